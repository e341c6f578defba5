//! Anchor name generation for headings and defined terms.
//!
//! Anchors are derived from display text: ASCII alphanumerics are kept
//! (lowercased), runs of whitespace collapse to a single `-`, and any
//! other character becomes `_`. [`AnchorSet`] keeps generated names
//! unique within one page by appending a numeric suffix on conflict.

use std::collections::HashMap;

/// Converts display text into an anchor fragment.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_was_space = false;
        } else if c.is_whitespace() {
            if !last_was_space && !out.is_empty() {
                out.push('-');
            }
            last_was_space = true;
        } else {
            out.push('_');
            last_was_space = false;
        }
    }
    // Trailing separator from trailing whitespace
    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// Tracks anchors handed out on a page and disambiguates conflicts.
///
/// The first use of a name is returned untouched; later uses get `-2`,
/// `-3`, and so on.
#[derive(Debug, Default)]
pub struct AnchorSet {
    used: HashMap<String, u32>,
}

impl AnchorSet {
    /// Creates an empty anchor set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugifies `text` and returns a page-unique anchor for it.
    pub fn anchor_for(&mut self, text: &str) -> String {
        let base = slugify(text);
        match self.used.get_mut(&base) {
            Some(count) => {
                *count += 1;
                let unique = format!("{base}-{count}");
                // The suffixed form itself counts as used now
                self.used.insert(unique.clone(), 1);
                unique
            }
            None => {
                self.used.insert(base.clone(), 1);
                base
            }
        }
    }
}
