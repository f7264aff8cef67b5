//! Constructors for synthesized tree fragments.
//!
//! Synthesized tokens have no source position. They carry just enough layout
//! trivia to print as conventionally formatted code, e.g.
//! `@http:ServiceConfig {serviceType: Svc}` followed by a newline.

use crate::SyntaxKind::{self, *};
use crate::{GreenElement, GreenNode, GreenToken, GreenTrivia};

pub fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::bare(kind, text)
}

pub fn identifier(text: &str) -> GreenToken {
    token(IDENTIFIER, text)
}

fn with_trailing(token: &GreenToken, layout: &str) -> GreenToken {
    token.with_trailing(GreenTrivia::layout(layout), layout)
}

fn with_leading(token: &GreenToken, layout: &str) -> GreenToken {
    token.with_leading(GreenTrivia::layout(layout), layout)
}

/// `module_prefix:identifier`
pub fn qualified_name_reference(module_prefix: &str, identifier_text: &str) -> GreenNode {
    GreenNode::new(
        QUALIFIED_NAME_REFERENCE,
        [identifier(module_prefix).into(), token(COLON, ":").into(), identifier(identifier_text).into()],
    )
}

/// `key: value`, with `value` stripped of its outer trivia.
pub fn specific_field(key: &str, value: &GreenNode) -> GreenNode {
    GreenNode::new(
        SPECIFIC_FIELD,
        [
            identifier(key).into(),
            with_trailing(&token(COLON, ":"), " ").into(),
            value.trimmed().into(),
        ],
    )
}

/// `{field, field}`
pub fn mapping_constructor(fields: impl IntoIterator<Item = GreenNode>) -> GreenNode {
    let mut children: Vec<GreenElement> = vec![token(LEFT_BRACE, "{").into()];
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            children.push(with_trailing(&token(COMMA, ","), " ").into());
        }
        children.push(field.into());
    }
    children.push(token(RIGHT_BRACE, "}").into());
    GreenNode::new(MAPPING_CONSTRUCTOR, children)
}

/// `@reference value` on a line of its own.
pub fn annotation(reference: GreenNode, value: Option<GreenNode>) -> GreenNode {
    let mut children: Vec<GreenElement> = vec![token(AT, "@").into(), reference.into()];
    if let Some(value) = value {
        children.push(value.map_first_token(|token| with_leading(token, " ")).into());
    }
    GreenNode::new(ANNOTATION, children).map_last_token(|token| with_trailing(token, "\n"))
}

/// `node` with the line break after its last token replaced by `newline`.
pub fn with_line_break(node: &GreenNode, newline: &str) -> GreenNode {
    node.map_last_token(|token| with_trailing(token, newline))
}

pub fn metadata(annotations: impl IntoIterator<Item = GreenNode>) -> GreenNode {
    GreenNode::new(METADATA, annotations.into_iter().map(GreenElement::from))
}
