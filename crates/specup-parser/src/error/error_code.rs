//! Error codes for the directive diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Tag scanning errors
//! - `E1xx` - Directive argument errors

use std::fmt;

/// Error codes for categorizing scan diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Tag scanning errors (E0xx)
    // =========================================================================
    /// Unterminated directive.
    ///
    /// A tag was opened with `[[` but never closed with `]]`.
    E001,

    /// Empty directive body.
    ///
    /// `[[]]` or a body consisting only of whitespace.
    E002,

    /// Missing separator.
    ///
    /// The directive kind keyword was not followed by `:`.
    E003,

    // =========================================================================
    // Directive argument errors (E1xx)
    // =========================================================================
    /// Unknown directive kind.
    ///
    /// The keyword before `:` is not one of `def`, `ref`, `tref`, `xref`.
    /// Reported as a warning; the tag is left verbatim.
    E100,

    /// Missing required argument.
    ///
    /// The directive kind requires more arguments than were given, or an
    /// argument was empty.
    E101,

    /// Too many arguments.
    ///
    /// The directive kind does not accept this many arguments.
    E102,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Tag scanning errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            // Directive argument errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated directive",
            ErrorCode::E002 => "empty directive body",
            ErrorCode::E003 => "missing `:` separator",
            ErrorCode::E100 => "unknown directive kind",
            ErrorCode::E101 => "missing required argument",
            ErrorCode::E102 => "too many arguments",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unterminated directive");
        assert_eq!(ErrorCode::E102.description(), "too many arguments");
    }
}
