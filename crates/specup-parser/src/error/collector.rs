//! Collector for accumulating diagnostics during a scan.
//!
//! The scanner reports every malformed tag it finds instead of failing
//! on the first one; the collector decides at the end whether the scan
//! as a whole succeeded.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics over one scan.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// Errors fail the scan with all diagnostics attached; a
    /// warnings-only collection succeeds and hands the warnings back for
    /// the caller to surface.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_empty_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().unwrap().is_empty());
    }

    #[test]
    fn test_collector_error_fails() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::error("unterminated directive"));

        assert!(collector.finish().is_err());
    }

    #[test]
    fn test_collector_warnings_only_succeeds() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("unknown directive kind `spec`"));
        collector.emit(Diagnostic::warning("unknown directive kind `insert`"));

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_collector_mixed_keeps_all_diagnostics() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(
            Diagnostic::error("empty directive body")
                .with_code(ErrorCode::E002)
                .with_label(Span::new(4..8), "here"),
        );
        collector.emit(Diagnostic::warning("unknown directive kind `toc`"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "empty directive body");
    }
}
