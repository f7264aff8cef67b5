//! Package, module and document model of a service project on disk, plus
//! the seam through which source modifiers hand back rewritten documents.

mod compilation;
mod loader;
mod modifier;
mod package;

use camino::Utf8PathBuf;

pub use compilation::{Compilation, DocumentDiagnostic};
pub use loader::load_package;
pub use modifier::{DocumentEdit, ModifierTask, SourceModifierContext, SourceSet};
pub use package::{Document, DocumentId, Module, ModuleId, Package};

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("`{path}` is not a directory")]
    NotADirectory { path: Utf8PathBuf },
    #[error("failed to read `{path}`")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("non UTF-8 path `{}`", path.display())]
    NonUtf8Path { path: std::path::PathBuf },
    #[error("invalid manifest `{path}`")]
    Manifest {
        path: Utf8PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
