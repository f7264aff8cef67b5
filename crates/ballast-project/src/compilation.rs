use ballast_db::check_file;
use ballast_errors::Diagnostic;

use crate::{DocumentId, Package};

/// A diagnostic together with the document it was reported in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDiagnostic {
    pub document: DocumentId,
    pub diagnostic: Diagnostic,
}

/// Snapshot of a checked package: the package and every diagnostic the
/// loader and the per-file checks produced.
#[derive(Debug, Clone)]
pub struct Compilation {
    package: Package,
    diagnostics: Vec<DocumentDiagnostic>,
}

impl Compilation {
    pub fn new(db: &dyn salsa::Database, package: Package) -> Self {
        let mut diagnostics = package.load_diagnostics().to_vec();
        for document in package.documents() {
            diagnostics.extend(check_file(db, document.file()).iter().map(|diagnostic| {
                DocumentDiagnostic { document: document.id(), diagnostic: diagnostic.clone() }
            }));
        }
        Self { package, diagnostics }
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn document_diagnostics(&self) -> &[DocumentDiagnostic] {
        &self.diagnostics
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().map(|entry| &entry.diagnostic)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(Diagnostic::is_error)
    }
}
