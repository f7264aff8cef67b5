use ballast_errors::Diagnostic;
use ballast_inputs::File;
use camino::{Utf8Path, Utf8PathBuf};

use crate::{DocumentDiagnostic, SourceSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u32);

impl ModuleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl DocumentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    root: Utf8PathBuf,
    modules: Vec<Module>,
    documents: Vec<Document>,
    load_diagnostics: Vec<DocumentDiagnostic>,
}

impl Package {
    pub fn new(name: impl Into<String>, root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            modules: Vec::new(),
            documents: Vec::new(),
            load_diagnostics: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn add_module(&mut self, name: impl Into<String>) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(Module {
            id,
            name: name.into(),
            document_ids: Vec::new(),
            test_document_ids: Vec::new(),
        });
        id
    }

    /// Registers `file` as a document of `module`.
    ///
    /// Panics if `module` was not created by this package.
    pub fn add_document(
        &mut self,
        module: ModuleId,
        file: File,
        source_set: SourceSet,
    ) -> DocumentId {
        let id = DocumentId(self.documents.len() as u32);
        self.documents.push(Document { id, module, file });
        let module = &mut self.modules[module.index()];
        match source_set {
            SourceSet::Main => module.document_ids.push(id),
            SourceSet::Test => module.test_document_ids.push(id),
        }
        id
    }

    /// Modules in creation order; the default module comes first.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: DocumentId) -> &Document {
        &self.documents[id.index()]
    }

    pub(crate) fn push_load_diagnostic(&mut self, document: DocumentId, diagnostic: Diagnostic) {
        self.load_diagnostics.push(DocumentDiagnostic { document, diagnostic });
    }

    /// Problems found while reading the package from disk.
    pub fn load_diagnostics(&self) -> &[DocumentDiagnostic] {
        &self.load_diagnostics
    }
}

#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    name: String,
    document_ids: Vec<DocumentId>,
    test_document_ids: Vec<DocumentId>,
}

impl Module {
    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document_ids(&self) -> &[DocumentId] {
        &self.document_ids
    }

    pub fn test_document_ids(&self) -> &[DocumentId] {
        &self.test_document_ids
    }

    /// Where `document` lives: main sources when listed among the module's
    /// documents, tests otherwise.
    pub fn source_set_of(&self, document: DocumentId) -> SourceSet {
        if self.document_ids.contains(&document) { SourceSet::Main } else { SourceSet::Test }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Document {
    id: DocumentId,
    module: ModuleId,
    file: File,
}

impl Document {
    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    pub fn file(&self) -> File {
        self.file
    }

    pub fn path(self, db: &dyn salsa::Database) -> &Utf8Path {
        self.file.path(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_are_routed_by_source_set() {
        let db = salsa::DatabaseImpl::new();
        let mut package = Package::new("demo", "/demo");
        let module = package.add_module("demo");

        let main = package.add_document(
            module,
            File::new(&db, "a.bal".into(), String::new()),
            SourceSet::Main,
        );
        let test = package.add_document(
            module,
            File::new(&db, "tests/a_test.bal".into(), String::new()),
            SourceSet::Test,
        );

        let module = package.module(module);
        assert_eq!(module.document_ids(), [main]);
        assert_eq!(module.test_document_ids(), [test]);
        assert_eq!(module.source_set_of(main), SourceSet::Main);
        assert_eq!(module.source_set_of(test), SourceSet::Test);
        assert_eq!(package.document(test).path(&db).as_str(), "tests/a_test.bal");
    }
}
