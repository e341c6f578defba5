//! The core diagnostic type for the scan error system.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A single error or warning with source location information.
///
/// # Example
///
/// ```text
/// error[E101]: missing required argument
///   --> spec.md:12:5
///    |
/// 12 | [[def:]]
///    | ^^^^^^^^ `def` needs a term
///    |
///    = help: write `[[def: term]]` or `[[def: term, alias]]`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// ```
    /// # use specup_parser::error::{Diagnostic, ErrorCode};
    /// # use specup_parser::Span;
    ///
    /// let diag = Diagnostic::error("`ref` takes exactly one term")
    ///     .with_code(ErrorCode::E102)
    ///     .with_label(Span::new(0..18), "extra argument here");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error_defaults() {
        let diag = Diagnostic::error("unterminated directive");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "unterminated directive");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("`tref` takes a spec and a term")
            .with_code(ErrorCode::E101)
            .with_label(Span::new(10..28), "only one argument given")
            .with_secondary_label(Span::new(10..12), "tag opened here")
            .with_help("write `[[tref: spec, term]]`");

        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.help(), Some("write `[[tref: spec, term]]`"));
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("empty directive body").with_code(ErrorCode::E002);
        assert_eq!(diag.to_string(), "error[E002]: empty directive body");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("unknown directive kind `insert`");
        assert_eq!(
            diag.to_string(),
            "warning: unknown directive kind `insert`"
        );
    }
}
