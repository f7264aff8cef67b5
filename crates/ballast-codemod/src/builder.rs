use ballast_syntax::ast::{AstNode as _, Metadata, TypeDescriptor};
use ballast_syntax::{GreenNode, make};

use crate::{HTTP, SERVICE_CONFIG_ANNOTATION, SERVICE_TYPE_FIELD};

/// `serviceType: T`
pub fn build_service_type_field(type_descriptor: &TypeDescriptor) -> GreenNode {
    make::specific_field(SERVICE_TYPE_FIELD, type_descriptor.green())
}

/// `@http:ServiceConfig {field}`
pub fn build_annotation(field: GreenNode) -> GreenNode {
    make::annotation(
        make::qualified_name_reference(HTTP, SERVICE_CONFIG_ANNOTATION),
        Some(make::mapping_constructor([field])),
    )
}

/// A metadata node holding `annotation` after everything in `existing`.
pub fn merge_into_metadata(existing: Option<&Metadata>, annotation: GreenNode) -> GreenNode {
    match existing {
        Some(metadata) => metadata.with_annotation_appended(annotation),
        None => make::metadata([annotation]),
    }
}

#[cfg(test)]
mod tests {
    use ballast_syntax::SyntaxKind::*;

    use super::*;
    use crate::parse_service;

    #[test]
    fn field_value_is_the_type_descriptor() {
        let service = parse_service("service http:Service on ep {}");
        let type_descriptor = service.type_descriptor().unwrap();

        let field = build_service_type_field(&type_descriptor);
        assert_eq!(field.kind(), SPECIFIC_FIELD);
        assert_eq!(field.to_string(), "serviceType: http:Service");
    }

    #[test]
    fn untrimmed_descriptor_is_shared() {
        let service = parse_service("service Svc\non ep {}");
        let type_descriptor = service.type_descriptor().unwrap();
        assert_eq!(type_descriptor.syntax().text(), "Svc\n");

        let field = build_service_type_field(&type_descriptor);
        assert_eq!(field.to_string(), "serviceType: Svc");
    }

    #[test]
    fn annotation_shape() {
        let service = parse_service("service Svc on ep {}");
        let field = build_service_type_field(&service.type_descriptor().unwrap());

        let annotation = build_annotation(field);
        assert_eq!(annotation.kind(), ANNOTATION);
        assert_eq!(annotation.to_string(), "@http:ServiceConfig {serviceType: Svc}\n");
    }

    #[test]
    fn merge_creates_metadata() {
        let annotation = build_annotation(make::specific_field(
            SERVICE_TYPE_FIELD,
            &GreenNode::new(SIMPLE_NAME_REFERENCE, [make::identifier("Svc").into()]),
        ));

        let metadata = merge_into_metadata(None, annotation.clone());
        assert_eq!(metadata.kind(), METADATA);
        assert_eq!(metadata.children().len(), 1);
        assert_eq!(metadata.to_string(), annotation.to_string());
    }

    #[test]
    fn merge_appends_last() {
        let service = parse_service("# Doc\n@a:B\n@c\nservice Svc on ep {}");
        let existing = service.metadata().unwrap();
        let annotation = build_annotation(build_service_type_field(
            &service.type_descriptor().unwrap(),
        ));

        let metadata = merge_into_metadata(Some(&existing), annotation.clone());
        let children = metadata.children();
        assert_eq!(children.len(), 4);
        for (old, new) in existing.green().children().iter().zip(children) {
            assert!(old.as_node().unwrap().ptr_eq(new.as_node().unwrap()));
        }
        assert!(children[3].as_node().unwrap().ptr_eq(&annotation));
        assert_eq!(
            metadata.to_string(),
            "# Doc\n@a:B\n@c\n@http:ServiceConfig {serviceType: Svc}\n"
        );
    }
}
