use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Hint,
}

impl Severity {
    fn level(self) -> Level {
        match self {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
            Severity::Hint => Level::Help,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Hint => "hint",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
    severity: Severity,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range, severity }
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self::new(Severity::Error, message, range)
    }

    pub fn warning(message: impl Into<String>, range: TextRange) -> Self {
        Self::new(Severity::Warning, message, range)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = self.severity.level();
        let message = level.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;

    #[test]
    fn severity_constructors() {
        let range = TextRange::empty(TextSize::new(0));
        assert!(Diagnostic::error("bad", range).is_error());
        assert!(!Diagnostic::warning("meh", range).is_error());
        assert!(!Diagnostic::new(Severity::Hint, "fyi", range).is_error());
    }

    #[test]
    fn render_points_at_range() {
        let text = "service on {}\n";
        let diagnostic = Diagnostic::error("expected expression", TextRange::new(8.into(), 10.into()));
        let rendered = diagnostic.render(&Renderer::plain(), "main.bal", text).to_string();
        assert!(rendered.starts_with("error: expected expression"), "{rendered}");
        assert!(rendered.contains("main.bal"), "{rendered}");
    }
}
