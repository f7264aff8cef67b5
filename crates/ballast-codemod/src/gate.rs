use ballast_errors::Diagnostic;

/// Returns `false` when any diagnostic is an error; a failed compilation is
/// never rewritten.
pub fn should_run<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> bool {
    !diagnostics.into_iter().any(Diagnostic::is_error)
}

#[cfg(test)]
mod tests {
    use ballast_errors::{Severity, TextRange};

    use super::*;

    fn diagnostic(severity: Severity) -> Diagnostic {
        Diagnostic::new(severity, "message", TextRange::default())
    }

    #[test]
    fn runs_without_errors() {
        assert!(should_run(&Vec::<Diagnostic>::new()));
        assert!(should_run(&[diagnostic(Severity::Warning), diagnostic(Severity::Hint)]));
    }

    #[test]
    fn any_error_blocks() {
        assert!(!should_run(&[diagnostic(Severity::Warning), diagnostic(Severity::Error)]));
        assert!(!should_run(&[diagnostic(Severity::Error)]));
    }
}
