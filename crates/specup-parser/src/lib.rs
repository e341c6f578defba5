//! # Specup Parser
//!
//! Scanner for the `[[def:...]]` / `[[ref:...]]` template-tag syntax
//! embedded in specification Markdown. The renderer hands each text run
//! to [`scan`] and receives it back sliced into plain text and parsed
//! directives.
//!
//! ## Usage
//!
//! ```
//! # use specup_parser::{scan, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let run = "A [[def: claim, Claim]] is made by a [[ref: holder]].";
//!
//!     let scanned = scan(run)?;
//!     assert_eq!(scanned.directives().count(), 2);
//!     Ok(())
//! }
//! ```

mod directive;
pub mod error;
mod scanner;
mod span;

pub use directive::{Directive, DirectiveKind};
pub use scanner::{Scan, Segment, scan, scan_at};
pub use span::{Span, Spanned};
