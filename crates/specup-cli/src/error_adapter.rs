//! Rendering of [`SpecupError`] values for terminal output.
//!
//! Directive scan failures carry structured diagnostics with source
//! spans; this module binds them to the input file and renders one
//! miette snippet per diagnostic, so a spec with three malformed tags
//! shows three labeled excerpts of `spec.md`. Every other error variant
//! is a plain message and is reported as such.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, NamedSource, Severity,
    SourceSpan,
};

use specup::SpecupError;
use specup_parser::error::Diagnostic;

/// A single scan diagnostic bound to its named source.
struct ScanDiagnostic<'a> {
    diag: &'a Diagnostic,
    src: &'a NamedSource<String>,
}

impl fmt::Debug for ScanDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanDiagnostic")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for ScanDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for ScanDiagnostic<'_> {}

impl MietteDiagnostic for ScanDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(if self.diag.severity().is_error() {
            Severity::Error
        } else {
            Severity::Warning
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        // Coded diagnostics without explicit help still get the code's
        // description as guidance
        match self.diag.help() {
            Some(help) => Some(Box::new(help) as Box<dyn fmt::Display>),
            None => self
                .diag
                .code()
                .map(|code| Box::new(code.description()) as Box<dyn fmt::Display>),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Convert a [`Span`](specup_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: specup_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Renders an error into terminal-ready reports.
///
/// A `Parse` error produces one graphical report per diagnostic, read
/// out of the source attached to the error and titled with
/// `source_name`. All other variants render as their display text.
pub fn render_reports(err: &SpecupError, source_name: &str) -> Vec<String> {
    let SpecupError::Parse {
        err: parse_err,
        src,
    } = err
    else {
        return vec![err.to_string()];
    };

    let reporter = GraphicalReportHandler::new();
    let named = NamedSource::new(source_name, src.clone());

    parse_err
        .diagnostics()
        .iter()
        .map(|diag| {
            let mut out = String::new();
            reporter
                .render_report(&mut out, &ScanDiagnostic { diag, src: &named })
                .expect("Writing to String buffer is infallible");
            out
        })
        .collect()
}
