//! Versioned snapshot directory names.
//!
//! A frozen specification snapshot lives in a directory named `vN`, with
//! `N` a non-negative integer. The filesystem layout is the only
//! persisted state: scanning a directory for [`VersionDir`] names is how
//! the next version number is computed.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a directory name is not a valid `vN` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a version directory name: `{0}`")]
pub struct InvalidVersionDir(String);

/// The name of a versioned snapshot directory, `vN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionDir(u32);

impl VersionDir {
    /// Creates the directory name for version `number`.
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// The version number.
    pub fn number(&self) -> u32 {
        self.0
    }

    /// The directory name following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Computes the next version after every name in `existing`, or `v1`
    /// when none parse as version directories.
    pub fn next_after<I>(existing: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        existing
            .into_iter()
            .filter_map(|name| name.as_ref().parse::<VersionDir>().ok())
            .max()
            .map_or(Self(1), |latest| latest.next())
    }
}

impl fmt::Display for VersionDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl FromStr for VersionDir {
    type Err = InvalidVersionDir;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('v')
            .ok_or_else(|| InvalidVersionDir(s.to_string()))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidVersionDir(s.to_string()));
        }
        digits
            .parse::<u32>()
            .map(VersionDir)
            .map_err(|_| InvalidVersionDir(s.to_string()))
    }
}
