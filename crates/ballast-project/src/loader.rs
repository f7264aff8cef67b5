use std::fs;

use ballast_errors::Diagnostic;
use ballast_inputs::File;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use text_size::{TextRange, TextSize};
use tracing::{debug, info};

use crate::{ModuleId, Package, ProjectError, SourceSet};

const MANIFEST_FILE: &str = "Ballerina.toml";
const SOURCE_EXTENSION: &str = "bal";
const MODULES_DIR: &str = "modules";
const TESTS_DIR: &str = "tests";
const FALLBACK_PACKAGE_NAME: &str = "main";

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    package: Option<ManifestPackage>,
}

#[derive(Debug, Deserialize)]
struct ManifestPackage {
    #[serde(default)]
    name: Option<String>,
}

/// Reads the package rooted at `root`.
///
/// The root's `.bal` files form the default module and `tests/` holds its
/// tests; every directory under `modules/` is a further module named
/// `<package>.<dir>` with the same layout. Documents are ordered by file name.
pub fn load_package(db: &dyn salsa::Database, root: &Utf8Path) -> Result<Package, ProjectError> {
    if !root.is_dir() {
        return Err(ProjectError::NotADirectory { path: root.to_owned() });
    }

    let name = package_name(root)?;
    let mut package = Package::new(name.clone(), root);

    let default_module = package.add_module(name.clone());
    load_module(db, &mut package, default_module, root)?;

    let modules_dir = root.join(MODULES_DIR);
    if modules_dir.is_dir() {
        for dir in sorted_entries(&modules_dir)? {
            let Some(module_name) = dir.file_name().filter(|_| dir.is_dir()) else {
                continue;
            };
            let module = package.add_module(format!("{name}.{module_name}"));
            load_module(db, &mut package, module, &dir)?;
        }
    }

    info!(
        package = %name,
        modules = package.modules().len(),
        documents = package.documents().len(),
        "package loaded"
    );
    Ok(package)
}

fn package_name(root: &Utf8Path) -> Result<String, ProjectError> {
    let manifest_path = root.join(MANIFEST_FILE);
    if manifest_path.is_file() {
        let text = fs::read_to_string(&manifest_path)
            .map_err(|source| ProjectError::Io { path: manifest_path.clone(), source })?;
        let manifest: Manifest = toml::from_str(&text)
            .map_err(|source| ProjectError::Manifest { path: manifest_path.clone(), source })?;
        if let Some(name) = manifest.package.and_then(|package| package.name) {
            return Ok(name);
        }
    }

    let root = root
        .canonicalize_utf8()
        .map_err(|source| ProjectError::Io { path: root.to_owned(), source })?;
    Ok(root.file_name().unwrap_or(FALLBACK_PACKAGE_NAME).to_owned())
}

fn load_module(
    db: &dyn salsa::Database,
    package: &mut Package,
    module: ModuleId,
    dir: &Utf8Path,
) -> Result<(), ProjectError> {
    for path in source_files(dir)? {
        load_document(db, package, module, path, SourceSet::Main)?;
    }

    let tests_dir = dir.join(TESTS_DIR);
    if tests_dir.is_dir() {
        for path in source_files(&tests_dir)? {
            load_document(db, package, module, path, SourceSet::Test)?;
        }
    }

    Ok(())
}

fn load_document(
    db: &dyn salsa::Database,
    package: &mut Package,
    module: ModuleId,
    path: Utf8PathBuf,
    source_set: SourceSet,
) -> Result<(), ProjectError> {
    let bytes = fs::read(&path).map_err(|source| ProjectError::Io { path: path.clone(), source })?;
    let (text, invalid_at) = match String::from_utf8(bytes) {
        Ok(text) => (text, None),
        Err(err) => {
            let valid_up_to = err.utf8_error().valid_up_to();
            (String::from_utf8_lossy(err.as_bytes()).into_owned(), Some(valid_up_to))
        }
    };

    debug!(%path, ?source_set, "document loaded");
    let file = File::new(db, path, text);
    let document = package.add_document(module, file, source_set);

    if let Some(offset) = invalid_at {
        let range = TextRange::empty(TextSize::new(offset as u32));
        package.push_load_diagnostic(document, Diagnostic::error("file is not valid UTF-8", range));
    }

    Ok(())
}

fn source_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ProjectError> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.extension() == Some(SOURCE_EXTENSION) && path.is_file())
        .collect())
}

fn sorted_entries(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ProjectError> {
    let io_error = |source| ProjectError::Io { path: dir.to_owned(), source };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let path =
            Utf8PathBuf::from_path_buf(path).map_err(|path| ProjectError::NonUtf8Path { path })?;
        entries.push(path);
    }
    entries.sort();
    Ok(entries)
}
