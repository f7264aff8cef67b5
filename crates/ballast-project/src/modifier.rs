use ballast_inputs::File;
use camino::Utf8PathBuf;
use serde::Serialize;

use crate::{Compilation, DocumentId, ModuleId};

/// Which half of a module a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSet {
    Main,
    Test,
}

/// New text for one document, produced by a source modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEdit {
    pub document: DocumentId,
    pub module: ModuleId,
    pub source_set: SourceSet,
    pub file: File,
    pub path: Utf8PathBuf,
    pub text: String,
}

impl DocumentEdit {
    /// Whether applying the edit would leave the document as it is.
    pub fn is_noop(&self, db: &dyn salsa::Database) -> bool {
        self.file.text(db) == self.text
    }
}

/// Host side of a source modification run.
pub trait SourceModifierContext {
    fn compilation(&self) -> &Compilation;

    fn modify_source_file(&mut self, text: String, document: DocumentId, module: ModuleId);

    fn modify_test_source_file(&mut self, text: String, document: DocumentId, module: ModuleId);
}

/// A compile-time pass that rewrites documents through a
/// [`SourceModifierContext`].
pub trait ModifierTask {
    fn modify(&self, db: &dyn salsa::Database, context: &mut dyn SourceModifierContext);
}
