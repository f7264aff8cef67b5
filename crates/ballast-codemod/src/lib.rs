//! Adds `@http:ServiceConfig {serviceType: T}` to typed service declarations
//! that do not carry an `http:ServiceConfig` annotation yet.
//!
//! The pass never edits a tree in place. Each rewritten declaration is a new
//! green node; the module part is rebuilt around it and every other member
//! is the original node, shared.

mod builder;
mod gate;
mod matcher;
mod rewrite;
mod walker;

pub use builder::{build_annotation, build_service_type_field, merge_into_metadata};
pub use gate::should_run;
pub use matcher::has_annotation;
pub use rewrite::{Rewrite, rewrite_service_declaration};
pub use walker::{ServiceTypeModifier, rewrite_tree, service_type_edits};

/// Module prefix of the injected annotation.
pub const HTTP: &str = "http";
pub const SERVICE_CONFIG_ANNOTATION: &str = "ServiceConfig";
pub const SERVICE_TYPE_FIELD: &str = "serviceType";

#[cfg(test)]
fn parse_service(text: &str) -> ballast_syntax::ast::ServiceDeclaration {
    use ballast_syntax::ast::ModuleMember;

    let parse = ballast_parse::parse_module(text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());
    parse
        .module_part()
        .members()
        .find_map(|member| match member {
            ModuleMember::Service(service) => Some(service),
            _ => None,
        })
        .expect("no service declaration")
}
