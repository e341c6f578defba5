//! Scanner for `[[kind: args]]` template tags in Markdown text.
//!
//! The scanner walks a text run, slices it into plain-text segments and
//! directives, and reports every malformed tag instead of stopping at
//! the first. Tag bodies are parsed with [`winnow`]; the surrounding
//! text is located with a plain `find` loop since everything outside
//! `[[...]]` passes through verbatim.

use log::trace;
use winnow::{
    ModalResult, Parser,
    ascii::multispace0,
    combinator::{opt, preceded},
    token::{rest, take_while},
};

use crate::{
    directive::{Directive, DirectiveKind},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
};

/// One slice of a scanned text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Verbatim text, including tags with unknown kinds.
    Text(Spanned<String>),
    /// A well-formed directive.
    Directive(Spanned<Directive>),
}

/// The result of scanning one text run.
#[derive(Debug, Default)]
pub struct Scan {
    segments: Vec<Segment>,
    warnings: Vec<Diagnostic>,
}

impl Scan {
    /// Text and directive segments in source order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Directives only, in source order.
    pub fn directives(&self) -> impl Iterator<Item = &Spanned<Directive>> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Directive(directive) => Some(directive),
            Segment::Text(_) => None,
        })
    }

    /// Warnings emitted during the scan (e.g. unknown directive kinds).
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// True when the run contained at least one directive.
    pub fn has_directives(&self) -> bool {
        self.directives().next().is_some()
    }
}

/// The parsed pieces of a tag body: kind keyword and raw argument text.
fn tag_body<'s>(input: &mut &'s str) -> ModalResult<(&'s str, Option<&'s str>)> {
    let _ = multispace0(input)?;
    let keyword =
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            .parse_next(input)?;
    let args = opt(preceded((multispace0, ':'), rest)).parse_next(input)?;
    if !input.is_empty() {
        // Leftover after the keyword means the `:` separator is missing
        return Err(winnow::error::ErrMode::Cut(
            winnow::error::ContextError::new(),
        ));
    }
    Ok((keyword, args))
}

/// Scans `source` for template tags.
///
/// Returns the segmented run on success; any malformed tag fails the
/// whole scan with one diagnostic per problem. Unknown directive kinds
/// are warnings and their tags stay in the text verbatim.
pub fn scan(source: &str) -> Result<Scan, ParseError> {
    scan_at(source, 0)
}

/// Scans a text run that starts at byte `base` of a larger document.
///
/// All spans in segments and diagnostics are offset by `base`, so a
/// caller scanning individual Markdown text events can report positions
/// in the full source.
pub fn scan_at(source: &str, base: usize) -> Result<Scan, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find("[[") {
        let open = cursor + found;

        let Some(close_rel) = source[open + 2..].find("]]") else {
            collector.emit(
                Diagnostic::error("unterminated directive")
                    .with_code(ErrorCode::E001)
                    .with_label(Span::new(base + open..base + open + 2), "tag opened here")
                    .with_help("close the directive with `]]`"),
            );
            // Nothing after an unterminated tag can be another tag
            cursor = source.len();
            break;
        };
        let close = open + 2 + close_rel;
        let tag_span = Span::new(base + open..base + close + 2);
        let body = &source[open + 2..close];

        if open > cursor {
            segments.push(text_segment(source, base, cursor, open));
        }
        cursor = close + 2;

        if body.trim().is_empty() {
            collector.emit(
                Diagnostic::error("empty directive body")
                    .with_code(ErrorCode::E002)
                    .with_label(tag_span, "nothing between `[[` and `]]`"),
            );
            continue;
        }

        let mut remaining = body;
        let Ok((keyword, args)) = tag_body(&mut remaining) else {
            collector.emit(
                Diagnostic::error("malformed directive")
                    .with_code(ErrorCode::E003)
                    .with_label(tag_span, "expected `[[kind: args]]`")
                    .with_help("separate the directive kind from its arguments with `:`"),
            );
            continue;
        };
        let Some(args) = args else {
            collector.emit(
                Diagnostic::error(format!("directive `{keyword}` has no arguments"))
                    .with_code(ErrorCode::E003)
                    .with_label(tag_span, "missing `:` and arguments")
                    .with_help(format!("write `[[{keyword}: ...]]`")),
            );
            continue;
        };

        let Some(kind) = DirectiveKind::from_keyword(keyword) else {
            collector.emit(
                Diagnostic::warning(format!("unknown directive kind `{keyword}`"))
                    .with_code(ErrorCode::E100)
                    .with_label(tag_span, "tag left as-is")
                    .with_help("known kinds are `def`, `ref`, `tref`, `xref`"),
            );
            segments.push(text_segment(source, base, open, close + 2));
            continue;
        };

        match build_directive(kind, args, tag_span) {
            Ok(directive) => {
                segments.push(Segment::Directive(Spanned::new(directive, tag_span)));
            }
            Err(diagnostic) => collector.emit(*diagnostic),
        }
    }

    if cursor < source.len() {
        segments.push(text_segment(source, base, cursor, source.len()));
    }

    let warnings = collector.finish()?;
    let scan = Scan { segments, warnings };
    trace!(
        segments = scan.segments.len(),
        directives = scan.directives().count();
        "Scanned text run"
    );
    Ok(scan)
}

fn text_segment(source: &str, base: usize, start: usize, end: usize) -> Segment {
    Segment::Text(Spanned::new(
        source[start..end].to_string(),
        Span::new(base + start..base + end),
    ))
}

/// Checks argument arity and builds the directive value.
fn build_directive(
    kind: DirectiveKind,
    args: &str,
    tag_span: Span,
) -> Result<Directive, Box<Diagnostic>> {
    let args: Vec<&str> = args.split(',').map(str::trim).collect();

    if args.iter().any(|arg| arg.is_empty()) {
        return Err(Box::new(
            Diagnostic::error(format!("directive `{}` has an empty argument", kind.keyword()))
                .with_code(ErrorCode::E101)
                .with_label(tag_span, "empty argument here"),
        ));
    }

    match kind {
        DirectiveKind::Def => match args.as_slice() {
            [term] => Ok(Directive::Def {
                term: (*term).to_string(),
                alias: None,
            }),
            [term, alias] => Ok(Directive::Def {
                term: (*term).to_string(),
                alias: Some((*alias).to_string()),
            }),
            _ => Err(too_many(kind, tag_span, "write `[[def: term]]` or `[[def: term, alias]]`")),
        },
        DirectiveKind::Ref => match args.as_slice() {
            [term] => Ok(Directive::Ref {
                term: (*term).to_string(),
            }),
            _ => Err(too_many(kind, tag_span, "write `[[ref: term]]`")),
        },
        DirectiveKind::Tref => match args.as_slice() {
            [spec, term] => Ok(Directive::Tref {
                spec: (*spec).to_string(),
                term: (*term).to_string(),
            }),
            [_] => Err(missing(kind, tag_span, "write `[[tref: spec, term]]`")),
            _ => Err(too_many(kind, tag_span, "write `[[tref: spec, term]]`")),
        },
        DirectiveKind::Xref => match args.as_slice() {
            [spec, term] => Ok(Directive::Xref {
                spec: (*spec).to_string(),
                term: (*term).to_string(),
            }),
            [_] => Err(missing(kind, tag_span, "write `[[xref: spec, term]]`")),
            _ => Err(too_many(kind, tag_span, "write `[[xref: spec, term]]`")),
        },
    }
}

fn too_many(kind: DirectiveKind, span: Span, help: &str) -> Box<Diagnostic> {
    Box::new(
        Diagnostic::error(format!(
            "too many arguments for directive `{}`",
            kind.keyword()
        ))
        .with_code(ErrorCode::E102)
        .with_label(span, "extra arguments here")
        .with_help(help),
    )
}

fn missing(kind: DirectiveKind, span: Span, help: &str) -> Box<Diagnostic> {
    Box::new(
        Diagnostic::error(format!(
            "missing argument for directive `{}`",
            kind.keyword()
        ))
        .with_code(ErrorCode::E101)
        .with_label(span, "a spec and a term are required")
        .with_help(help),
    )
}
