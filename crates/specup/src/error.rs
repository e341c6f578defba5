//! Error types for specup operations.
//!
//! [`SpecupError`] wraps every failure mode of the pipeline: I/O,
//! directive scanning (with the source attached for rich reporting),
//! configuration, rendering, and freezing.

use std::io;

use thiserror::Error;

use specup_parser::error::ParseError;

/// The main error type for specup operations.
///
/// The `Parse` variant carries structured diagnostics with source spans
/// so the CLI can render labeled snippets.
#[derive(Debug, Error)]
pub enum SpecupError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Freeze error: {0}")]
    Freeze(String),
}

impl SpecupError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
