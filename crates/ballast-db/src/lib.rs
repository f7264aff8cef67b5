pub use ballast_errors::Diagnostic;
use ballast_inputs::File;
use ballast_parse::FileParse as _;
use ballast_syntax::ast::{AstNode as _, ModulePart};
use rustc_hash::FxHashSet;
use salsa::Database;

#[salsa::db]
#[derive(Clone, Default)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl Database for RootDatabase {}

/// Diagnostics for a single document, in source order.
#[salsa::tracked(returns(ref), no_eq)]
pub fn check_file(db: &dyn Database, file: File) -> Vec<Diagnostic> {
    let parse = file.parse(db);
    let mut diagnostics = parse.diagnostics().to_vec();
    duplicate_imports(&parse.module_part(), &mut diagnostics);
    diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());
    diagnostics
}

fn duplicate_imports(module: &ModulePart, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = FxHashSet::default();
    for import in module.imports() {
        let path = import.module_path();
        if path.is_empty() {
            continue;
        }
        if !seen.insert(path.clone()) {
            diagnostics.push(Diagnostic::warning(
                format!("duplicate import of `{path}`"),
                import.syntax().trimmed_range(),
            ));
        }
    }
}
