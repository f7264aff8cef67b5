use ballast_syntax::ast::{AstNode as _, Metadata, NameReference};

/// Whether `metadata` carries an annotation `namespace:name`.
///
/// Only module-qualified references are considered, and only the name is
/// compared: the annotation's value is not inspected.
pub fn has_annotation(metadata: Option<&Metadata>, namespace: &str, name: &str) -> bool {
    let Some(metadata) = metadata else {
        return false;
    };

    metadata.annotations().any(|annotation| {
        let Some(NameReference::Qualified(reference)) = annotation.annot_reference() else {
            return false;
        };
        let text = reference.syntax().text_trimmed();
        let mut segments = text.split(':');
        let first = segments.next().unwrap_or_default();
        let last = segments.next_back().unwrap_or(first);
        last.trim() == name && first.trim() == namespace
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_service;

    fn check(text: &str) -> bool {
        let service = parse_service(text);
        has_annotation(service.metadata().as_ref(), "http", "ServiceConfig")
    }

    #[test]
    fn absent_metadata() {
        assert!(!check("service T on ep {}"));
    }

    #[test]
    fn qualified_match() {
        assert!(check("@http:ServiceConfig\nservice T on ep {}"));
        assert!(check("@http:ServiceConfig {basePath: \"/x\"}\nservice T on ep {}"));
        assert!(check("@http : ServiceConfig {}\nservice T on ep {}"));
    }

    #[test]
    fn match_after_other_annotations() {
        assert!(check("# Docs\n@display {label: \"x\"}\n@a:B\n@http:ServiceConfig\nservice T on ep {}"));
    }

    #[test]
    fn near_misses() {
        assert!(!check("@ServiceConfig\nservice T on ep {}"));
        assert!(!check("@grpc:ServiceConfig\nservice T on ep {}"));
        assert!(!check("@http:serviceConfig\nservice T on ep {}"));
        assert!(!check("@HTTP:ServiceConfig\nservice T on ep {}"));
        assert!(!check("# http:ServiceConfig\nservice T on ep {}"));
    }
}
