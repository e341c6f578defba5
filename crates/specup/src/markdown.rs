//! Markdown rendering with specification extensions.
//!
//! This module drives [`pulldown_cmark`] over the specification source
//! and applies the three extensions on top of stock Markdown:
//!
//! - headings get page-unique `id` anchors derived from their text,
//! - tables are classed `spec-table` and wrapped in a scroll container,
//! - `[[...]]` template tags in text runs are rewritten into term
//!   anchors and links, recording every definition and reference in the
//!   document [`Glossary`].
//!
//! Text inside code blocks and inline code is never scanned for tags.

use log::{debug, warn};

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html::push_html};
use pulldown_cmark_escape::escape_html;

use specup_core::{
    anchor::AnchorSet,
    glossary::{ExternalReference, Glossary, TermDefinition},
};
use specup_parser::{Directive, Segment, error::ParseError, scan_at};

use crate::{
    config::AppConfig,
    document::{Block, Document},
    error::SpecupError,
};

/// Renders specification Markdown into a [`Document`].
///
/// Directive scan errors from every text run are accumulated and
/// returned as a single `Parse` error with the full source attached.
pub fn render(source: &str, config: &AppConfig) -> Result<Document, SpecupError> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut state = RenderState::new(config);

    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        state.step(event, range.start);
    }
    state.finish(source)
}

/// Accumulated state of one rendering pass.
struct RenderState<'c> {
    config: &'c AppConfig,
    heading_anchors: AnchorSet,
    term_anchors: AnchorSet,
    glossary: Glossary,
    errors: Vec<specup_parser::error::Diagnostic>,
    blocks: Vec<Block>,
    title: Option<String>,
    /// Events of the content block currently being accumulated.
    pending: Vec<Event<'static>>,
    /// Consecutive text events joined into one run for scanning.
    text_buf: String,
    /// Source offset of the buffered run.
    text_start: usize,
    /// Level, inline events, and plain text of an open heading.
    heading: Option<(u8, Vec<Event<'static>>, String)>,
    in_code_block: bool,
}

impl<'c> RenderState<'c> {
    fn new(config: &'c AppConfig) -> Self {
        Self {
            config,
            heading_anchors: AnchorSet::new(),
            term_anchors: AnchorSet::new(),
            glossary: Glossary::new(),
            errors: Vec::new(),
            blocks: Vec::new(),
            title: None,
            pending: Vec::new(),
            text_buf: String::new(),
            text_start: 0,
            heading: None,
            in_code_block: false,
        }
    }

    fn step(&mut self, event: Event<'_>, offset: usize) {
        if let Some(heading) = &mut self.heading {
            match event {
                Event::End(TagEnd::Heading(_)) => self.close_heading(),
                other => {
                    if let Event::Text(text) | Event::Code(text) = &other {
                        heading.2.push_str(text);
                    }
                    heading.1.push(own_event(other));
                }
            }
            return;
        }

        // A `[[...]]` tag rarely arrives whole: the parser emits each
        // unmatched bracket as its own text event. Buffer consecutive
        // text events and scan the joined run at the next boundary.
        if let Event::Text(text) = &event {
            if !self.in_code_block {
                if self.text_buf.is_empty() {
                    self.text_start = offset;
                }
                self.text_buf.push_str(text);
                return;
            }
        }

        self.flush_text();

        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_content();
                self.heading = Some((level as u8, Vec::new(), String::new()));
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                self.in_code_block = true;
                self.pending
                    .push(own_event(Event::Start(Tag::CodeBlock(kind))));
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                self.pending.push(Event::End(TagEnd::CodeBlock));
            }
            Event::Start(Tag::Table(alignments)) => {
                self.pending
                    .push(Event::Html(CowStr::from("<div class=\"table-wrap\">\n")));
                self.pending
                    .push(own_event(Event::Start(Tag::Table(alignments))));
            }
            Event::End(TagEnd::Table) => {
                self.pending.push(Event::End(TagEnd::Table));
                self.pending.push(Event::Html(CowStr::from("</div>\n")));
            }
            other => self.pending.push(own_event(other)),
        }
    }

    /// Scans the buffered text run for template tags and queues the
    /// rewritten events.
    fn flush_text(&mut self) {
        if self.text_buf.is_empty() {
            return;
        }
        let run = std::mem::take(&mut self.text_buf);

        let scanned = match scan_at(&run, self.text_start) {
            Ok(scanned) => scanned,
            Err(err) => {
                self.errors.extend(err.diagnostics().iter().cloned());
                return;
            }
        };

        for warning in scanned.warnings() {
            warn!("{warning}");
        }

        for segment in scanned.segments() {
            match segment {
                Segment::Text(run) => self
                    .pending
                    .push(Event::Text(CowStr::from(run.inner().clone()))),
                Segment::Directive(directive) => {
                    let html = self.render_directive(directive.inner());
                    self.pending.push(Event::InlineHtml(CowStr::from(html)));
                }
            }
        }
    }

    /// Rewrites one directive into inline HTML and records it in the
    /// glossary.
    fn render_directive(&mut self, directive: &Directive) -> String {
        match directive {
            Directive::Def { term, alias } => {
                let mut definition = TermDefinition::new(term.clone());
                if let Some(alias) = alias {
                    definition = definition.with_alias(alias.clone());
                }
                let display = escape(definition.display_text());
                let anchor = self.term_anchors.anchor_for(term);
                self.glossary.define(definition);
                format!("<span class=\"term\" id=\"term:{anchor}\">{display}</span>")
            }
            Directive::Ref { term } => {
                self.glossary.reference(term.clone());
                let anchor = specup_core::anchor::slugify(term);
                format!(
                    "<a class=\"term-ref\" href=\"#term:{anchor}\">{}</a>",
                    escape(term)
                )
            }
            Directive::Tref { spec, term } => self.external_link(spec, term, "term-ref external"),
            Directive::Xref { spec, term } => self.external_link(spec, term, "term-xref external"),
        }
    }

    fn external_link(&mut self, spec: &str, term: &str, class: &str) -> String {
        self.glossary
            .reference_external(ExternalReference::new(spec, term));

        match self.config.external_spec(spec) {
            Some(external) => {
                let url = external.term_url(&specup_core::anchor::slugify(term));
                format!(
                    "<a class=\"{class}\" href=\"{}\">{}</a>",
                    escape(&url),
                    escape(term)
                )
            }
            None => {
                warn!(spec, term; "Unknown external spec, rendering term as plain text");
                escape(term)
            }
        }
    }

    /// Renders the accumulated content events into a block.
    fn flush_content(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let mut html = String::new();
        push_html(&mut html, self.pending.drain(..));

        // pulldown renders a bare <table>; the wrapper div is already in
        // place, the class still needs adding
        let html = html.replace("<table>", "<table class=\"spec-table\">");

        if !html.trim().is_empty() {
            self.blocks.push(Block::content(html));
        }
    }

    /// Closes the open heading into a heading block.
    fn close_heading(&mut self) {
        let Some((level, events, text)) = self.heading.take() else {
            return;
        };

        let anchor = self.heading_anchors.anchor_for(&text);
        let mut inner = String::new();
        push_html(&mut inner, events.into_iter());

        let html = format!(
            "<h{level} id=\"{anchor}\">{}</h{level}>\n",
            inner.trim_end()
        );

        if level == 1 && self.title.is_none() {
            self.title = Some(text);
        }
        self.blocks.push(Block::heading(level, anchor, html));
    }

    fn finish(mut self, source: &str) -> Result<Document, SpecupError> {
        self.flush_text();
        self.flush_content();

        if !self.errors.is_empty() {
            return Err(SpecupError::new_parse_error(
                ParseError::new(self.errors),
                source,
            ));
        }

        debug!(
            blocks = self.blocks.len(),
            definitions = self.glossary.definitions().len(),
            references = self.glossary.references().len();
            "Markdown rendered"
        );
        Ok(Document::new(self.title, self.blocks, self.glossary))
    }
}

/// HTML-escapes a text fragment.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing to a String is infallible
    let _ = escape_html(&mut out, text);
    out
}

/// Rebinds a borrowed event to the `'static` lifetime by taking
/// ownership of its strings.
fn own_event(event: Event<'_>) -> Event<'static> {
    match event {
        Event::Start(tag) => Event::Start(own_tag(tag)),
        Event::End(end) => Event::End(end),
        Event::Text(s) => Event::Text(own_str(s)),
        Event::Code(s) => Event::Code(own_str(s)),
        Event::Html(s) => Event::Html(own_str(s)),
        Event::InlineHtml(s) => Event::InlineHtml(own_str(s)),
        Event::InlineMath(s) => Event::InlineMath(own_str(s)),
        Event::DisplayMath(s) => Event::DisplayMath(own_str(s)),
        Event::FootnoteReference(s) => Event::FootnoteReference(own_str(s)),
        Event::SoftBreak => Event::SoftBreak,
        Event::HardBreak => Event::HardBreak,
        Event::Rule => Event::Rule,
        Event::TaskListMarker(checked) => Event::TaskListMarker(checked),
    }
}

fn own_tag(tag: Tag<'_>) -> Tag<'static> {
    match tag {
        Tag::Paragraph => Tag::Paragraph,
        Tag::Heading {
            level,
            id,
            classes,
            attrs,
        } => Tag::Heading {
            level,
            id: id.map(own_str),
            classes: classes.into_iter().map(own_str).collect(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (own_str(k), v.map(own_str)))
                .collect(),
        },
        Tag::BlockQuote(kind) => Tag::BlockQuote(kind),
        Tag::CodeBlock(kind) => Tag::CodeBlock(own_code_block_kind(kind)),
        Tag::HtmlBlock => Tag::HtmlBlock,
        Tag::List(first) => Tag::List(first),
        Tag::Item => Tag::Item,
        Tag::FootnoteDefinition(s) => Tag::FootnoteDefinition(own_str(s)),
        Tag::DefinitionList => Tag::DefinitionList,
        Tag::DefinitionListTitle => Tag::DefinitionListTitle,
        Tag::DefinitionListDefinition => Tag::DefinitionListDefinition,
        Tag::Table(alignments) => Tag::Table(alignments),
        Tag::TableHead => Tag::TableHead,
        Tag::TableRow => Tag::TableRow,
        Tag::TableCell => Tag::TableCell,
        Tag::Emphasis => Tag::Emphasis,
        Tag::Strong => Tag::Strong,
        Tag::Strikethrough => Tag::Strikethrough,
        Tag::Superscript => Tag::Superscript,
        Tag::Subscript => Tag::Subscript,
        Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        } => Tag::Link {
            link_type,
            dest_url: own_str(dest_url),
            title: own_str(title),
            id: own_str(id),
        },
        Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        } => Tag::Image {
            link_type,
            dest_url: own_str(dest_url),
            title: own_str(title),
            id: own_str(id),
        },
        Tag::MetadataBlock(kind) => Tag::MetadataBlock(kind),
    }
}

fn own_code_block_kind(
    kind: pulldown_cmark::CodeBlockKind<'_>,
) -> pulldown_cmark::CodeBlockKind<'static> {
    match kind {
        pulldown_cmark::CodeBlockKind::Indented => pulldown_cmark::CodeBlockKind::Indented,
        pulldown_cmark::CodeBlockKind::Fenced(info) => {
            pulldown_cmark::CodeBlockKind::Fenced(own_str(info))
        }
    }
}

fn own_str(s: CowStr<'_>) -> CowStr<'static> {
    CowStr::from(s.into_string())
}
