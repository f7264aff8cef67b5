use ballast_db::{Diagnostic, RootDatabase, check_file};
use ballast_errors::Severity;
use ballast_inputs::File;

#[derive(Debug, PartialEq, Eq)]
struct ExpectedDiag {
    line: usize,
    severity: Severity,
    message: String,
}

#[derive(Debug, PartialEq, Eq)]
struct ActualDiag {
    line: usize,
    severity: Severity,
    message: String,
}

fn parse_expectations(fixture: &str) -> Vec<ExpectedDiag> {
    let mut expected = Vec::new();

    for (idx, line) in fixture.lines().enumerate() {
        let Some((_, comment)) = line.split_once("//~") else {
            continue;
        };
        let comment = comment.trim();
        let (severity, comment) = if let Some(rest) = comment.strip_prefix("WARNING") {
            (Severity::Warning, rest)
        } else {
            (Severity::Error, comment.strip_prefix("ERROR").unwrap_or(comment))
        };
        let comment = comment.trim();
        if comment.is_empty() {
            continue;
        }
        expected.push(ExpectedDiag { line: idx + 1, severity, message: comment.to_owned() });
    }

    expected
}

fn collect_actual(db: &RootDatabase, file: File, diagnostics: &[Diagnostic]) -> Vec<ActualDiag> {
    let line_index = file.line_index(db);
    let mut actual = diagnostics
        .iter()
        .map(|diag| {
            let line = line_index.line_col(diag.range().start()).line as usize + 1;
            ActualDiag { line, severity: diag.severity(), message: diag.message().to_owned() }
        })
        .collect::<Vec<_>>();
    actual.sort_by_key(|diag| (diag.line, diag.message.clone()));
    actual
}

#[track_caller]
fn check(fixture: &str) {
    let db = RootDatabase::default();
    let file = File::new(&db, "check.bal".into(), fixture.to_owned());

    let diagnostics = check_file(&db, file);
    let mut actual = collect_actual(&db, file, diagnostics);
    let mut expected = parse_expectations(fixture);

    expected.sort_by_key(|diag| (diag.line, diag.message.clone()));

    assert_eq!(
        expected.len(),
        actual.len(),
        "expected {} diagnostic(s), got {}\nexpected: {expected:#?}\nactual: {actual:#?}",
        expected.len(),
        actual.len(),
    );

    for expected_diag in expected {
        let Some(pos) = actual.iter().position(|diag| {
            diag.line == expected_diag.line
                && diag.severity == expected_diag.severity
                && diag.message.contains(&expected_diag.message)
        }) else {
            panic!(
                "missing diagnostic on line {} containing `{}`\nactual: {actual:#?}",
                expected_diag.line, expected_diag.message
            );
        };
        actual.remove(pos);
    }

    assert!(actual.is_empty(), "unexpected diagnostics:\n{actual:#?}");
}

#[test]
fn clean_module() {
    check(
        r#"
import ballerina/http;

@http:ServiceConfig {serviceType: Api}
service Api /api on new http:Listener(9090) {
    resource function get greeting() returns string {
        return "hello";
    }
}
"#,
    );
}

#[test]
fn missing_on_keyword() {
    check(
        r#"
service /api { //~ ERROR expected `on`
}
"#,
    );
}

#[test]
fn missing_listener_expression() {
    check(
        r#"
service /api on { //~ ERROR expected expression
}
"#,
    );
}

#[test]
fn stray_token_at_module_level() {
    check(
        r#"
import ballerina/http;
} //~ ERROR expected a module-level declaration
"#,
    );
}

#[test]
fn duplicate_import_is_a_warning() {
    check(
        r#"
import ballerina/http;
import ballerina/http; //~ WARNING duplicate import of `ballerina/http`
"#,
    );
}

#[test]
fn check_file_is_memoized_until_text_changes() {
    use salsa::Setter as _;

    let mut db = RootDatabase::default();
    let file = File::new(&db, "main.bal".into(), "service on ep {}\n".to_owned());
    assert!(check_file(&db, file).is_empty());

    file.set_text(&mut db).to("service on {}\n".to_owned());
    let diagnostics = check_file(&db, file);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_error());
}
