use ballast_parse::FileParse as _;
use ballast_project::{
    Compilation, DocumentEdit, ModifierTask, SourceModifierContext, SourceSet,
};
use ballast_syntax::SyntaxTree;
use ballast_syntax::ast::{AstNode as _, ModuleMember, ModulePart};
use tracing::{debug, warn};

use crate::{Rewrite, rewrite_service_declaration, should_run};

/// Rewrites every service declaration of `tree`.
///
/// Members keep their order; anything that is not rewritten is the original
/// green node. A tree without rewrites is returned as is.
pub fn rewrite_tree(tree: &SyntaxTree) -> SyntaxTree {
    let Some(module) = ModulePart::cast(tree.root()) else {
        return tree.clone();
    };

    let mut changed = false;
    let members = module
        .members()
        .map(|member| match &member {
            ModuleMember::Service(service) => match rewrite_service_declaration(service) {
                Rewrite::Rewritten(node) => {
                    debug!(
                        range = ?service.syntax().trimmed_range(),
                        "added service type annotation"
                    );
                    changed = true;
                    node
                }
                Rewrite::Unchanged => service.green().clone(),
            },
            ModuleMember::Function(_)
            | ModuleMember::Listener(_)
            | ModuleMember::Type(_)
            | ModuleMember::Const(_)
            | ModuleMember::Class(_)
            | ModuleMember::Enum(_)
            | ModuleMember::AnnotationDecl(_)
            | ModuleMember::Var(_) => member.green().clone(),
        })
        .collect::<Vec<_>>();

    if !changed {
        return tree.clone();
    }

    match module.with_members(members) {
        Some(root) => tree.modify_with(root),
        None => tree.clone(),
    }
}

/// One edit per main-source document of the compilation. Test sources are
/// never rewritten.
///
/// Nothing is produced when the compilation has errors.
pub fn service_type_edits(db: &dyn salsa::Database, compilation: &Compilation) -> Vec<DocumentEdit> {
    if !should_run(compilation.diagnostics()) {
        warn!("compilation has errors, skipping service type annotations");
        return Vec::new();
    }

    let package = compilation.package();
    let mut edits = Vec::new();
    for module in package.modules() {
        for &id in module.document_ids() {
            let document = package.document(id);
            let file = document.file();
            let tree = rewrite_tree(file.parse(db).tree());

            edits.push(DocumentEdit {
                document: id,
                module: module.id(),
                source_set: module.source_set_of(id),
                file,
                path: document.path(db).to_owned(),
                text: tree.text(),
            });
        }
    }
    debug!(documents = edits.len(), "service type pass finished");
    edits
}

/// Hands the rewritten text of every document back to the host, routing each
/// edit by the source set its document belongs to.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceTypeModifier;

impl ModifierTask for ServiceTypeModifier {
    fn modify(&self, db: &dyn salsa::Database, context: &mut dyn SourceModifierContext) {
        let edits = service_type_edits(db, context.compilation());
        for edit in edits {
            match edit.source_set {
                SourceSet::Main => context.modify_source_file(edit.text, edit.document, edit.module),
                SourceSet::Test => {
                    context.modify_test_source_file(edit.text, edit.document, edit.module)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ballast_parse::parse_module;

    use super::*;

    #[test]
    fn unchanged_tree_is_shared() {
        let parse = parse_module("import ballerina/http;\n\nservice /a on ep {}\nfunction f() {}\n");
        let tree = rewrite_tree(parse.tree());
        assert!(tree.green().ptr_eq(parse.tree().green()));
    }

    #[test]
    fn other_members_are_shared() {
        let parse = parse_module(
            "listener http:Listener ep = new (9090);\n\nservice Svc on ep {}\n\ntype Svc service object {};\n",
        );
        let before = parse.module_part();
        let tree = rewrite_tree(parse.tree());
        let after = ModulePart::cast(tree.root()).unwrap();

        let pairs = before.members().zip(after.members()).collect::<Vec<_>>();
        assert_eq!(pairs.len(), 3);
        assert!(pairs[0].0.green().ptr_eq(pairs[0].1.green()));
        assert!(!pairs[1].0.green().ptr_eq(pairs[1].1.green()));
        assert!(pairs[2].0.green().ptr_eq(pairs[2].1.green()));
        assert!(before.imports().count() == after.imports().count());
    }

    #[test]
    fn every_typed_service_is_rewritten() {
        let parse = parse_module("service A on ep {}\nservice on ep {}\nservice B on ep {}\n");
        let tree = rewrite_tree(parse.tree());
        assert_eq!(
            tree.text(),
            "@http:ServiceConfig {serviceType: A}\nservice A on ep {}\nservice on ep {}\n\
             @http:ServiceConfig {serviceType: B}\nservice B on ep {}\n"
        );
    }

    #[test]
    fn non_module_root_is_returned_as_is() {
        let parse = parse_module("service T on ep {}\n");
        let service = parse.module_part().members().next().unwrap();
        let tree = SyntaxTree::new(service.green().clone());

        let rewritten = rewrite_tree(&tree);
        assert!(rewritten.green().ptr_eq(tree.green()));
    }
}
