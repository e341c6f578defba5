//! Error and diagnostic system for the directive scanner.
//!
//! Built around [`Diagnostic`]: a single error or warning with an
//! optional [`ErrorCode`], one or more labeled source spans, and help
//! text. A scan accumulates diagnostics in a [`DiagnosticCollector`] and
//! failures surface as a [`ParseError`] wrapping all of them.
//!
//! # Example
//!
//! ```
//! # use specup_parser::error::{Diagnostic, ErrorCode};
//! # use specup_parser::Span;
//!
//! let span = Span::new(14..16);
//!
//! let diag = Diagnostic::error("directive is never closed")
//!     .with_code(ErrorCode::E001)
//!     .with_label(span, "opened here")
//!     .with_help("close the directive with `]]`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
