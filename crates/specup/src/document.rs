//! The rendered document model.
//!
//! A [`Document`] is the output of the Markdown stage: an ordered list
//! of [`Block`]s (headings and the content runs between them), the page
//! title, and the [`Glossary`] collected from directives. The section
//! highlight lives here too, since it is a property of the document
//! (at most one section highlighted at a time), not of any single
//! render.

use std::ops::Range;

use log::debug;

use specup_core::glossary::Glossary;

/// What a block is: a heading or opaque content HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A heading with its level (1-6) and page anchor.
    Heading {
        /// Heading level, 1 through 6.
        level: u8,
        /// The page-unique anchor assigned to this heading.
        anchor: String,
    },
    /// Everything between headings, already rendered to HTML.
    Content,
}

/// One rendered block of the document.
#[derive(Debug, Clone)]
pub struct Block {
    kind: BlockKind,
    html: String,
}

impl Block {
    /// Creates a heading block.
    pub fn heading(level: u8, anchor: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Heading {
                level,
                anchor: anchor.into(),
            },
            html: html.into(),
        }
    }

    /// Creates a content block.
    pub fn content(html: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Content,
            html: html.into(),
        }
    }

    /// The block kind.
    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    /// The rendered HTML of this block.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The heading level, for heading blocks.
    pub fn heading_level(&self) -> Option<u8> {
        match &self.kind {
            BlockKind::Heading { level, .. } => Some(*level),
            BlockKind::Content => None,
        }
    }

    /// The anchor, for heading blocks.
    pub fn anchor(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Heading { anchor, .. } => Some(anchor),
            BlockKind::Content => None,
        }
    }
}

/// A fully parsed and rendered specification document.
#[derive(Debug, Default)]
pub struct Document {
    title: Option<String>,
    blocks: Vec<Block>,
    glossary: Glossary,
    highlight: Option<Range<usize>>,
}

impl Document {
    /// Assembles a document from the Markdown stage's output.
    pub fn new(title: Option<String>, blocks: Vec<Block>, glossary: Glossary) -> Self {
        Self {
            title,
            blocks,
            glossary,
            highlight: None,
        }
    }

    /// The document title (first level-1 heading), if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The rendered blocks, in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The glossary collected while rendering.
    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// The currently highlighted block range, if any.
    pub fn highlighted(&self) -> Option<Range<usize>> {
        self.highlight.clone()
    }

    /// Highlights the section starting at the heading with `anchor`.
    ///
    /// The section runs from that heading up to (not including) the next
    /// heading whose level is numerically less than or equal to the
    /// start heading's level. Any prior highlight is removed first, so
    /// at most one section is highlighted at a time. Returns `false`
    /// (with the highlight cleared) when no heading has the anchor.
    pub fn highlight_section(&mut self, anchor: &str) -> bool {
        self.highlight = None;

        let Some(start) = self
            .blocks
            .iter()
            .position(|block| block.anchor() == Some(anchor))
        else {
            debug!(anchor; "No heading found for highlight anchor");
            return false;
        };

        let start_level = self.blocks[start]
            .heading_level()
            .expect("block found by anchor is a heading");

        // Walk siblings until a heading at the same or a shallower level
        let end = self.blocks[start + 1..]
            .iter()
            .position(|block| matches!(block.heading_level(), Some(level) if level <= start_level))
            .map_or(self.blocks.len(), |offset| start + 1 + offset);

        debug!(anchor, start, end; "Section highlighted");
        self.highlight = Some(start..end);
        true
    }

    /// Removes the active highlight, if any.
    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        Document::new(
            Some("Widget Spec".to_string()),
            vec![
                Block::heading(1, "widget-spec", "<h1 id=\"widget-spec\">Widget Spec</h1>"),
                Block::content("<p>intro</p>"),
                Block::heading(2, "scope", "<h2 id=\"scope\">Scope</h2>"),
                Block::content("<p>scope text</p>"),
                Block::heading(3, "details", "<h3 id=\"details\">Details</h3>"),
                Block::content("<p>details text</p>"),
                Block::heading(2, "terms", "<h2 id=\"terms\">Terms</h2>"),
                Block::content("<p>terms text</p>"),
            ],
            Glossary::new(),
        )
    }

    #[test]
    fn test_highlight_stops_at_same_level_heading() {
        let mut doc = sample_document();

        assert!(doc.highlight_section("scope"));
        // "scope" h2 plus everything up to the "terms" h2, including the
        // nested h3 section
        assert_eq!(doc.highlighted(), Some(2..6));
    }

    #[test]
    fn test_highlight_subsection_runs_to_parent_boundary() {
        let mut doc = sample_document();

        assert!(doc.highlight_section("details"));
        assert_eq!(doc.highlighted(), Some(4..6));
    }

    #[test]
    fn test_highlight_last_section_runs_to_end() {
        let mut doc = sample_document();

        assert!(doc.highlight_section("terms"));
        assert_eq!(doc.highlighted(), Some(6..8));
    }

    #[test]
    fn test_highlight_h1_covers_whole_document() {
        let mut doc = sample_document();

        assert!(doc.highlight_section("widget-spec"));
        assert_eq!(doc.highlighted(), Some(0..8));
    }

    #[test]
    fn test_new_highlight_replaces_old() {
        let mut doc = sample_document();

        assert!(doc.highlight_section("scope"));
        assert!(doc.highlight_section("terms"));
        // Only the latest highlight survives
        assert_eq!(doc.highlighted(), Some(6..8));
    }

    #[test]
    fn test_unknown_anchor_clears_highlight() {
        let mut doc = sample_document();

        assert!(doc.highlight_section("scope"));
        assert!(!doc.highlight_section("no-such-anchor"));
        assert_eq!(doc.highlighted(), None);
    }

    #[test]
    fn test_clear_highlight() {
        let mut doc = sample_document();

        doc.highlight_section("scope");
        doc.clear_highlight();
        assert_eq!(doc.highlighted(), None);
    }
}
