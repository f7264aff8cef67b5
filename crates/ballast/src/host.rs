use ballast_project::{Compilation, DocumentId, ModuleId, SourceModifierContext, SourceSet};

/// Collects the texts a modifier hands back, keyed by document.
pub(crate) struct CollectingHost {
    compilation: Compilation,
    pending: Vec<Pending>,
}

pub(crate) struct Pending {
    pub(crate) document: DocumentId,
    pub(crate) module: ModuleId,
    pub(crate) source_set: SourceSet,
    pub(crate) text: String,
}

impl CollectingHost {
    pub(crate) fn new(compilation: Compilation) -> Self {
        Self { compilation, pending: Vec::new() }
    }

    pub(crate) fn into_parts(self) -> (Compilation, Vec<Pending>) {
        (self.compilation, self.pending)
    }
}

impl SourceModifierContext for CollectingHost {
    fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    fn modify_source_file(&mut self, text: String, document: DocumentId, module: ModuleId) {
        self.pending.push(Pending { document, module, source_set: SourceSet::Main, text });
    }

    fn modify_test_source_file(&mut self, text: String, document: DocumentId, module: ModuleId) {
        self.pending.push(Pending { document, module, source_set: SourceSet::Test, text });
    }
}
