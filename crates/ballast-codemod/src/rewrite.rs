use ballast_syntax::ast::{AstNode as _, ServiceDeclaration};
use ballast_syntax::{GreenNode, make};

use crate::{
    HTTP, SERVICE_CONFIG_ANNOTATION, build_annotation, build_service_type_field, has_annotation,
    merge_into_metadata,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Unchanged,
    Rewritten(GreenNode),
}

impl Rewrite {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, Self::Rewritten(_))
    }

    /// The rewritten node, or `original` itself when nothing changed.
    pub fn unwrap_or(self, original: &GreenNode) -> GreenNode {
        match self {
            Self::Rewritten(node) => node,
            Self::Unchanged => original.clone(),
        }
    }
}

/// Adds `@http:ServiceConfig {serviceType: T}` to a typed service that lacks
/// an `http:ServiceConfig` annotation.
pub fn rewrite_service_declaration(service: &ServiceDeclaration) -> Rewrite {
    let Some(type_descriptor) = service.type_descriptor() else {
        return Rewrite::Unchanged;
    };

    let metadata = service.metadata();
    if has_annotation(metadata.as_ref(), HTTP, SERVICE_CONFIG_ANNOTATION) {
        return Rewrite::Unchanged;
    }

    let field = build_service_type_field(&type_descriptor);
    let annotation = match line_ending(service) {
        "\n" => build_annotation(field),
        newline => make::with_line_break(&build_annotation(field), newline),
    };
    let metadata = merge_into_metadata(metadata.as_ref(), annotation);
    Rewrite::Rewritten(service.with_metadata(metadata))
}

/// The line ending used by the declaration, `\n` when it has none.
fn line_ending(service: &ServiceDeclaration) -> &'static str {
    let text = service.syntax().text();
    match text.find('\n') {
        Some(index) if text[..index].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}
