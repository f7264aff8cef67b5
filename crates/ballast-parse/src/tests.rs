use ballast_inputs::File;
use ballast_syntax::SyntaxKind::{self, *};
use ballast_syntax::ast::{self, AstNode, AttachPoint, MappingField, NameReference};
use ballast_syntax::make;
use expect_test::{Expect, expect};

use crate::{FileParse, parse_module};

fn check(text: &str, expect: Expect) {
    let parse = parse_module(text);
    let diagnostics = parse
        .diagnostics()
        .iter()
        .map(|d| format!("  {}", d.message()))
        .collect::<Vec<_>>()
        .join("\n");
    let actual = format!("{}Errors:\n{diagnostics}", parse.tree().root().debug_tree());
    expect.assert_eq(&actual);
}

fn single_service(text: &str) -> ast::ServiceDeclaration {
    let parse = parse_module(text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());
    match parse.module_part().members().next() {
        Some(ast::ModuleMember::Service(service)) => service,
        other => panic!("expected a service, got {other:?}"),
    }
}

#[test]
fn import_and_service() {
    check(
        "import ballerina/http;\n\nservice /api on ep {\n}\n",
        expect![[r#"
            MODULE_PART@0..47
              IMPORT_DECLARATION@0..23
                IMPORT_KW@0..6 "import"
                IDENTIFIER@7..16 "ballerina"
                SLASH@16..17 "/"
                IDENTIFIER@17..21 "http"
                SEMICOLON@21..22 ";"
              SERVICE_DECLARATION@23..47
                SERVICE_KW@24..31 "service"
                ABSOLUTE_RESOURCE_PATH@32..37
                  SLASH@32..33 "/"
                  IDENTIFIER@33..36 "api"
                ON_KW@37..39 "on"
                EXPRESSION_LIST@40..43
                  EXPRESSION@40..43
                    IDENTIFIER@40..42 "ep"
                SERVICE_BODY@43..47
                  LEFT_BRACE@43..44 "{"
                  RIGHT_BRACE@45..46 "}"
              EOF@47..47 ""
            Errors:
        "#]],
    );
}

#[test]
fn annotated_typed_service() {
    let service = single_service(
        r#"# Greets.
@http:ServiceConfig {cors: {allowOrigins: ["*"]}, ...base}
isolated service http:Service "svc" on new http:Listener(9090), ep2 {
    resource function get .() returns string { return "hi"; }
}
"#,
    );

    let metadata = service.metadata().unwrap();
    assert_eq!(metadata.documentation().unwrap().lines(), ["Greets."]);

    let annotations = metadata.annotations().collect::<Vec<_>>();
    assert_eq!(annotations.len(), 1);
    let Some(NameReference::Qualified(reference)) = annotations[0].annot_reference() else {
        panic!("expected a qualified annotation reference");
    };
    assert_eq!(reference.module_prefix().unwrap().text_trimmed(), "http");
    assert_eq!(reference.identifier().unwrap().text_trimmed(), "ServiceConfig");

    let fields = annotations[0].annot_value().unwrap().fields().collect::<Vec<_>>();
    assert_eq!(fields.len(), 2);
    let MappingField::Specific(cors) = &fields[0] else { panic!("expected a specific field") };
    assert_eq!(cors.field_name().unwrap().text_trimmed(), "cors");
    assert_eq!(cors.value_expr().unwrap().kind(), MAPPING_CONSTRUCTOR);
    assert!(matches!(fields[1], MappingField::Spread(_)));

    assert!(service.isolated_token().is_some());
    assert_eq!(service.type_descriptor().unwrap().syntax().text_trimmed(), "http:Service");
    let Some(AttachPoint::StringLiteral(name)) = service.attach_point() else {
        panic!("expected a string attach point");
    };
    assert_eq!(name.text_trimmed(), "\"svc\"");
    assert_eq!(service.expressions().unwrap().expressions().count(), 2);
    assert!(service.body().is_some());
}

#[test]
fn untyped_service_has_no_type_descriptor() {
    let service = single_service("service / on new http:Listener(8080) {}\n");
    assert!(service.type_descriptor().is_none());
    assert!(service.metadata().is_none());
    let Some(AttachPoint::ResourcePath(path)) = service.attach_point() else {
        panic!("expected a resource path");
    };
    assert!(path.segments().is_empty());
}

#[test]
fn escaped_resource_path() {
    let service = single_service("service T /hello\\-world/v\\.1 on ep {}\n");
    let Some(AttachPoint::ResourcePath(path)) = service.attach_point() else {
        panic!("expected a resource path");
    };
    assert_eq!(path.segments(), ["hello\\-world", "v\\.1"]);
}

#[test]
fn header_tokens() {
    let service = single_service("@a:B {x: 1, ...rest}\nservice q:T on ep {}\n");
    assert_eq!(service.service_keyword().unwrap().text_trimmed(), "service");
    assert_eq!(service.on_keyword().unwrap().text_trimmed(), "on");

    let Some(NameReference::Qualified(type_descriptor)) = service.type_descriptor() else {
        panic!("expected a qualified type descriptor");
    };
    assert_eq!(type_descriptor.colon_token().unwrap().text_trimmed(), ":");

    let annotation = service.metadata().unwrap().annotations().next().unwrap();
    let fields = annotation.annot_value().unwrap().fields().collect::<Vec<_>>();
    let [MappingField::Specific(x), MappingField::Spread(rest)] = fields.as_slice() else {
        panic!("expected a specific and a spread field, got {fields:?}");
    };
    assert_eq!(x.colon_token().unwrap().text_trimmed(), ":");
    assert_eq!(x.value_expr().unwrap().text_trimmed(), "1");
    assert_eq!(rest.expression().unwrap().text_trimmed(), "rest");
}

#[test]
fn member_kinds() {
    let text = r#"public function main() {
}
type R record {|
    int a;
|};
listener http:Listener ep = new (8080);
const PORT = 9090;
isolated client class C {
}
enum Color { RED, GREEN }
annotation Tag on service;
configurable int port = 8080;
final string[] names = ["a"];
public isolated service class Greeter {
    remote function hi() {}
}
[int, string] pair = [1, "a"];
service class Echo {
}
(int|string) choice = 1;
"#;
    let parse = parse_module(text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());
    assert_eq!(parse.tree().text(), text);

    let kinds = parse
        .module_part()
        .members()
        .map(|member| member.syntax().kind())
        .collect::<Vec<SyntaxKind>>();
    assert_eq!(
        kinds,
        [
            FUNCTION_DEFINITION,
            TYPE_DEFINITION,
            LISTENER_DECLARATION,
            CONST_DECLARATION,
            CLASS_DEFINITION,
            ENUM_DECLARATION,
            ANNOTATION_DECLARATION,
            MODULE_VAR_DECLARATION,
            MODULE_VAR_DECLARATION,
            CLASS_DEFINITION,
            MODULE_VAR_DECLARATION,
            CLASS_DEFINITION,
            MODULE_VAR_DECLARATION,
        ]
    );
}

#[test]
fn import_module_path() {
    let parse = parse_module("import ballerina/http as h;\nimport foo.bar;\n");
    let paths =
        parse.module_part().imports().map(|import| import.module_path()).collect::<Vec<_>>();
    assert_eq!(paths, ["ballerina/http", "foo.bar"]);
}

#[test]
fn syntax_errors_are_reported() {
    let cases = [
        ("service /x {}", "expected `on`"),
        ("service on {}", "expected expression"),
        ("}\n", "expected a module-level declaration"),
        ("service on ep {", "unclosed service body"),
        ("@http:ServiceConfig {}\n", "expected a declaration"),
        ("function f() {", "unexpected end of file in declaration"),
    ];

    for (text, message) in cases {
        let parse = parse_module(text);
        let messages =
            parse.diagnostics().iter().map(|d| d.message().to_owned()).collect::<Vec<_>>();
        assert!(messages.iter().any(|m| m == message), "{text:?}: {messages:?}");
        assert!(parse.diagnostics().iter().all(|d| d.is_error()));
    }
}

#[test]
fn parsing_is_lossless() {
    let texts = [
        "",
        "\n\n// only a comment\n",
        "import ballerina/http;\r\n\r\nservice on ep {}\r\n",
        "@a:B @c {x: 1, \"y\": 2, z}\n# doc\nservice T on l1, l2 { int x = {a: 1}; }",
        "service \"unterminated on ep {}\n",
        "} ; @ service on",
        "type T record { string `tpl ${x}` ; };\n// trailing",
    ];

    for text in texts {
        let parse = parse_module(text);
        assert_eq!(parse.tree().text(), text);
        assert_eq!(parse.tree().root().text_range().len(), text.len().try_into().unwrap());
    }

    let parse = parse_module("service on ep {}\n\n// end\n");
    assert_eq!(parse.module_part().eof_token().unwrap().text(), "\n// end\n");
}

#[test]
fn with_metadata_moves_leading_trivia() {
    let parse = parse_module("import a/b;\n\n// svc\nservice on ep {}\n");
    let Some(ast::ModuleMember::Service(service)) = parse.module_part().members().next() else {
        panic!("expected a service");
    };
    let annotation =
        make::annotation(make::qualified_name_reference("http", "ServiceConfig"), None);

    let rewritten = service.with_metadata(make::metadata([annotation]));
    assert_eq!(rewritten.to_string(), "\n// svc\n@http:ServiceConfig\nservice on ep {}\n");
    assert_eq!(service.syntax().text(), "\n// svc\nservice on ep {}\n");
}

#[test]
fn with_members_replaces_in_order() {
    let parse = parse_module("import a/b;\nconst A = 1;\nconst B = 2;\n");
    let module = parse.module_part();
    let members = module.members().map(|member| member.green().clone()).collect::<Vec<_>>();

    let swapped = module.with_members(members.iter().rev().cloned().collect()).unwrap();
    assert_eq!(swapped.to_string(), "import a/b;\nconst B = 2;\nconst A = 1;\n");
    assert!(module.with_members(members[..1].to_vec()).is_none());
}

#[test]
fn file_parse_is_memoized() {
    let db = salsa::DatabaseImpl::new();
    let file = File::new(&db, "main.bal".into(), "service on ep {}\n".to_owned());

    let first = file.parse(&db);
    let second = file.parse(&db);
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.tree().text(), "service on ep {}\n");
}
