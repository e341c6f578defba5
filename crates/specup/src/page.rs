//! Assembly of the final HTML page.
//!
//! [`PageRenderer`] takes the rendered [`Document`] and wraps it in the
//! full page chrome: head metadata, the toolbar (font-size controls,
//! edit/history links, download buttons), the terminology section built
//! from the glossary, and the closing script/footer. Meta-info panels
//! embedded in the source as `<dl>` lists are made collapsible as a
//! final string transform over the assembled body.

use std::fmt::{self, Write};

use pulldown_cmark_escape::escape_html;

use specup_core::anchor::slugify;
use specup_core::glossary::Glossary;

use crate::{config::AppConfig, document::Document, probe::DownloadLink};

/// Renders a [`Document`] into a complete HTML page.
pub struct PageRenderer<'a> {
    config: &'a AppConfig,
    downloads: &'a [DownloadLink],
}

impl<'a> PageRenderer<'a> {
    /// Creates a renderer for the given configuration and probed
    /// download links.
    pub fn new(config: &'a AppConfig, downloads: &'a [DownloadLink]) -> Self {
        Self { config, downloads }
    }

    /// Renders the complete page.
    pub fn render(&self, document: &Document) -> String {
        let mut out = String::new();
        self.write_page(&mut out, document)
            .expect("writing to a String cannot fail");
        wrap_meta_panels(&out)
    }

    fn write_page(&self, out: &mut String, document: &Document) -> fmt::Result {
        self.write_head(out, document)?;
        self.write_toolbar(out)?;
        self.write_body(out, document)?;
        self.write_terminology(out, document.glossary())?;
        self.write_footer(out)?;

        if self.config.output().assets() {
            out.push_str("<script src=\"assets/interactions.js\"></script>\n");
        }
        out.push_str("</body>\n</html>\n");
        Ok(())
    }

    fn write_head(&self, out: &mut String, document: &Document) -> fmt::Result {
        let title = document.title().unwrap_or(self.config.site().title());

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        write!(out, "<title>{}</title>\n", escape(title))?;

        if let Some(description) = self.config.site().description() {
            write!(
                out,
                "<meta name=\"description\" content=\"{}\">\n",
                escape(description)
            )?;
        }
        if self.config.output().assets() {
            out.push_str("<link rel=\"stylesheet\" href=\"assets/main.css\">\n");
        }
        out.push_str("</head>\n<body>\n");
        Ok(())
    }

    fn write_toolbar(&self, out: &mut String) -> fmt::Result {
        out.push_str("<header class=\"toolbar\">\n");

        // Font-size controls are wired up by interactions.js
        out.push_str("<div class=\"toolbar-group\">\n");
        out.push_str(
            "<button type=\"button\" id=\"font-size-down\" title=\"Smaller text\">A-</button>\n",
        );
        out.push_str(
            "<button type=\"button\" id=\"font-size-up\" title=\"Larger text\">A+</button>\n",
        );
        out.push_str("</div>\n");

        if let Some(repo) = self.config.repository() {
            out.push_str("<div class=\"toolbar-group\">\n");
            write!(
                out,
                "<a class=\"toolbar-button\" href=\"{}\">Edit</a>\n",
                escape(&repo.edit_url())
            )?;
            write!(
                out,
                "<a class=\"toolbar-button\" href=\"{}\">History</a>\n",
                escape(&repo.history_url())
            )?;
            out.push_str("</div>\n");
        }

        if !self.downloads.is_empty() {
            out.push_str("<div class=\"toolbar-group\">\n");
            for link in self.downloads {
                write!(
                    out,
                    "<a class=\"toolbar-button download\" href=\"{}\" download>{}</a>\n",
                    escape(link.href()),
                    link.label()
                )?;
            }
            out.push_str("</div>\n");
        }

        out.push_str("</header>\n");
        Ok(())
    }

    fn write_body(&self, out: &mut String, document: &Document) -> fmt::Result {
        out.push_str("<main class=\"spec-body\">\n");

        let highlight = document.highlighted();
        for (index, block) in document.blocks().iter().enumerate() {
            if let Some(range) = &highlight {
                if index == range.start {
                    out.push_str("<div class=\"section-highlight\">\n");
                }
            }

            out.push_str(block.html());

            if let Some(range) = &highlight {
                if index + 1 == range.end {
                    out.push_str("</div>\n");
                }
            }
        }

        out.push_str("</main>\n");
        Ok(())
    }

    fn write_terminology(&self, out: &mut String, glossary: &Glossary) -> fmt::Result {
        if glossary.definitions().is_empty() && glossary.external_references().is_empty() {
            return Ok(());
        }

        out.push_str("<section class=\"terminology\">\n");
        out.push_str("<h2 id=\"terminology\">Terminology</h2>\n");
        out.push_str("<dl class=\"terms-and-definitions-list\">\n");

        for definition in glossary.definitions() {
            write!(
                out,
                "<dt><a href=\"#term:{}\">{}</a></dt>\n",
                slugify(definition.term()),
                escape(definition.display_text())
            )?;
        }

        for external in glossary.external_references() {
            match self.config.external_spec(external.spec()) {
                Some(spec) => write!(
                    out,
                    "<dt><a class=\"external\" href=\"{}\">{} ({})</a></dt>\n",
                    escape(&spec.term_url(&slugify(external.term()))),
                    escape(external.term()),
                    escape(external.spec())
                )?,
                None => write!(
                    out,
                    "<dt>{} ({})</dt>\n",
                    escape(external.term()),
                    escape(external.spec())
                )?,
            }
        }

        out.push_str("</dl>\n</section>\n");
        Ok(())
    }

    fn write_footer(&self, out: &mut String) -> fmt::Result {
        let Some(repo) = self.config.repository() else {
            return Ok(());
        };

        write!(
            out,
            "<footer><a href=\"{}\">{}</a></footer>\n",
            escape(&repo.repo_url()),
            escape(&repo.slug())
        )
    }
}

/// Makes embedded meta-info panels collapsible.
///
/// Specification sources embed raw `<dl>` panels whose `<dd>` entries
/// may hold large tables. Every `<dd>` that contains a table is wrapped
/// in a collapse body with a toggle button, and the last `<dd>` of each
/// list is classed `last-dd` so the stylesheet can close the panel
/// border.
fn wrap_meta_panels(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    let mut last_dd_in_out: Option<usize> = None;

    loop {
        let rest = &html[cursor..];

        // Whichever of the two markers comes next drives the step
        let (found, is_dd) = match (rest.find("<dd"), rest.find("</dl>")) {
            (Some(dd), Some(close)) if dd < close => (dd, true),
            (_, Some(close)) => (close, false),
            (Some(dd), None) => (dd, true),
            (None, None) => break,
        };
        let tag_start = cursor + found;
        out.push_str(&html[cursor..tag_start]);

        if is_dd {
            let tag = &html[tag_start..];
            let (Some(open_end_rel), Some(close_rel)) = (tag.find('>'), tag.find("</dd>")) else {
                // Truncated markup passes through untouched
                cursor = tag_start;
                break;
            };

            let open_tag = &tag[..open_end_rel + 1];
            let content = &tag[open_end_rel + 1..close_rel];
            last_dd_in_out = Some(out.len());

            if content.contains("<table") {
                out.push_str(&add_class(open_tag, "meta-panel"));
                out.push_str(
                    "<div class=\"button-container\">\
                     <button type=\"button\" class=\"collapse-toggle\">Details</button>\
                     </div>",
                );
                out.push_str("<div class=\"collapse-body collapsed\">");
                out.push_str(content);
                out.push_str("</div></dd>");
            } else {
                out.push_str(open_tag);
                out.push_str(content);
                out.push_str("</dd>");
            }
            cursor = tag_start + close_rel + "</dd>".len();
        } else {
            cursor = tag_start + "</dl>".len();

            // Re-class the final <dd> of the list just closed
            if let Some(dd_start) = last_dd_in_out.take() {
                if let Some(open_end) = out[dd_start..].find('>') {
                    let reclassed = add_class(&out[dd_start..dd_start + open_end + 1], "last-dd");
                    out.replace_range(dd_start..dd_start + open_end + 1, &reclassed);
                }
            }
            out.push_str("</dl>");
        }
    }

    out.push_str(&html[cursor..]);
    out
}

/// Adds a class to an opening tag, merging with an existing attribute.
fn add_class(open_tag: &str, class: &str) -> String {
    if let Some(pos) = open_tag.find("class=\"") {
        let insert_at = pos + "class=\"".len();
        format!(
            "{}{} {}",
            &open_tag[..insert_at],
            class,
            &open_tag[insert_at..]
        )
    } else {
        let end = open_tag.len() - 1;
        format!("{} class=\"{}\">", &open_tag[..end], class)
    }
}

/// HTML-escapes an attribute or text fragment.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let _ = escape_html(&mut out, text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Block;
    use specup_core::glossary::{ExternalReference, TermDefinition};

    fn sample_document() -> Document {
        let mut glossary = Glossary::new();
        glossary.define(TermDefinition::new("claim").with_alias("Claim"));
        glossary.reference_external(ExternalReference::new("vc-data-model", "issuer"));

        Document::new(
            Some("Widget Spec".to_string()),
            vec![
                Block::heading(1, "widget-spec", "<h1 id=\"widget-spec\">Widget Spec</h1>\n"),
                Block::content("<p>intro</p>\n"),
                Block::heading(2, "scope", "<h2 id=\"scope\">Scope</h2>\n"),
                Block::content("<p>scope text</p>\n"),
            ],
            glossary,
        )
    }

    #[test]
    fn test_page_head_uses_document_title() {
        let config = AppConfig::default();
        let page = PageRenderer::new(&config, &[]).render(&sample_document());

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Widget Spec</title>"));
        assert!(page.contains("assets/main.css"));
        assert!(page.contains("assets/interactions.js"));
    }

    #[test]
    fn test_page_falls_back_to_site_title() {
        let config = AppConfig::default();
        let doc = Document::new(None, vec![], Glossary::new());
        let page = PageRenderer::new(&config, &[]).render(&doc);

        assert!(page.contains("<title>Specification</title>"));
    }

    #[test]
    fn test_toolbar_repository_buttons() {
        let config: AppConfig = toml::from_str(
            r#"
            [repository]
            account = "example"
            repo = "widget-spec"
            "#,
        )
        .unwrap();
        let page = PageRenderer::new(&config, &[]).render(&sample_document());

        assert!(page.contains("https://github.com/example/widget-spec/edit/main/spec.md"));
        assert!(page.contains("https://github.com/example/widget-spec/commits/main/spec.md"));
        assert!(page.contains("<footer><a href=\"https://github.com/example/widget-spec\">"));
    }

    #[test]
    fn test_toolbar_without_repository_has_no_edit_button() {
        let config = AppConfig::default();
        let page = PageRenderer::new(&config, &[]).render(&sample_document());

        assert!(!page.contains(">Edit</a>"));
        assert!(!page.contains("<footer>"));
    }

    #[test]
    fn test_terminology_section_lists_terms() {
        let config = AppConfig::default();
        let page = PageRenderer::new(&config, &[]).render(&sample_document());

        assert!(page.contains("<h2 id=\"terminology\">Terminology</h2>"));
        assert!(page.contains("<dt><a href=\"#term:claim\">Claim</a></dt>"));
        // Unresolvable external spec renders without a link
        assert!(page.contains("<dt>issuer (vc-data-model)</dt>"));
    }

    #[test]
    fn test_terminology_omitted_when_empty() {
        let config = AppConfig::default();
        let doc = Document::new(None, vec![Block::content("<p>x</p>")], Glossary::new());
        let page = PageRenderer::new(&config, &[]).render(&doc);

        assert!(!page.contains("Terminology"));
    }

    #[test]
    fn test_highlight_range_is_wrapped() {
        let config = AppConfig::default();
        let mut doc = sample_document();
        assert!(doc.highlight_section("scope"));

        let page = PageRenderer::new(&config, &[]).render(&doc);
        let start = page.find("<div class=\"section-highlight\">").unwrap();
        let scope = page.find("<h2 id=\"scope\">").unwrap();
        assert!(start < scope);
    }

    #[test]
    fn test_wrap_meta_panels_collapses_table_dd() {
        let html = "<dl><dt>Status</dt><dd>Draft</dd>\
                    <dt>Log</dt><dd><table><tr><td>x</td></tr></table></dd></dl>";
        let wrapped = wrap_meta_panels(html);

        assert!(wrapped.contains("<dd class=\"last-dd meta-panel\">"));
        assert!(wrapped.contains("collapse-toggle"));
        assert!(wrapped.contains("<div class=\"collapse-body collapsed\"><table>"));
        // The plain dd is untouched apart from position
        assert!(wrapped.contains("<dd>Draft</dd>"));
    }

    #[test]
    fn test_wrap_meta_panels_marks_last_dd() {
        let html = "<dl><dt>A</dt><dd>one</dd><dt>B</dt><dd>two</dd></dl>";
        let wrapped = wrap_meta_panels(html);

        assert!(wrapped.contains("<dd>one</dd>"));
        assert!(wrapped.contains("<dd class=\"last-dd\">two</dd>"));
    }

    #[test]
    fn test_wrap_meta_panels_marks_each_list() {
        let html = "<dl><dt>A</dt><dd>one</dd></dl><p>between</p><dl><dt>B</dt><dd>two</dd></dl>";
        let wrapped = wrap_meta_panels(html);

        assert!(wrapped.contains("<dd class=\"last-dd\">one</dd>"));
        assert!(wrapped.contains("<dd class=\"last-dd\">two</dd>"));
        assert!(wrapped.contains("<p>between</p>"));
    }

    #[test]
    fn test_wrap_meta_panels_passthrough_without_dl() {
        let html = "<p>no panels here</p>";
        assert_eq!(wrap_meta_panels(html), html);
    }

    #[test]
    fn test_download_buttons() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("spec.md");
        std::fs::write(&source, "# S").unwrap();
        std::fs::write(dir.path().join("spec.pdf"), b"%PDF-").unwrap();

        let config = AppConfig::default();
        let downloads = crate::probe::probe_downloads(&source);
        let page = PageRenderer::new(&config, &downloads).render(&sample_document());

        assert!(page.contains("href=\"spec.pdf\" download>PDF</a>"));
    }
}
