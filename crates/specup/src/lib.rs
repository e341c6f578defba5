//! Specup - A Markdown-to-HTML generator for technical specifications.
//!
//! Rendering, page assembly, and snapshot versioning for specification
//! documents written in Markdown with `[[def:...]]`/`[[ref:...]]` term
//! directives.

pub mod config;

mod assets;
mod document;
mod error;
mod freeze;
mod markdown;
mod page;
mod probe;

pub use specup_core::{anchor, glossary, version};

pub use document::{Block, BlockKind, Document};
pub use error::SpecupError;
pub use freeze::freeze;
pub use probe::{DownloadFormat, DownloadLink, probe_downloads};

use std::fs;
use std::path::Path;

use log::{debug, info};

use config::AppConfig;
use page::PageRenderer;

/// Builder for rendering specification sources into published pages.
///
/// This provides an API for processing a specification through the
/// Markdown, directive, and page-assembly stages.
///
/// # Examples
///
/// ```rust,no_run
/// use specup::{SiteBuilder, config::AppConfig};
///
/// let source = "# My Spec\n\nA [[def: claim]] is an assertion.";
///
/// let builder = SiteBuilder::new(AppConfig::default());
///
/// // Parse and render the Markdown source to a document
/// let document = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Assemble the complete HTML page
/// let page = builder.render_page(&document, &[]);
/// ```
#[derive(Default)]
pub struct SiteBuilder {
    config: AppConfig,
}

impl SiteBuilder {
    /// Create a new site builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse Markdown source into a rendered [`Document`].
    ///
    /// This runs the Markdown pipeline with heading anchoring, table
    /// wrapping, and directive rewriting, collecting the glossary as it
    /// goes.
    ///
    /// # Errors
    ///
    /// Returns `SpecupError::Parse` when any directive in the source is
    /// malformed; all problems are reported together.
    pub fn parse(&self, source: &str) -> Result<Document, SpecupError> {
        info!("Rendering specification Markdown");

        let document = markdown::render(source, &self.config)?;

        debug!(
            blocks = document.blocks().len(),
            title:? = document.title();
            "Document rendered"
        );
        Ok(document)
    }

    /// Assemble a [`Document`] into a complete HTML page.
    pub fn render_page(&self, document: &Document, downloads: &[DownloadLink]) -> String {
        PageRenderer::new(&self.config, downloads).render(document)
    }

    /// Build the specification from `source_path` into the configured
    /// output directory.
    ///
    /// Reads the source, probes for downloadable renditions next to it,
    /// renders the page to `index.html`, and writes the static assets
    /// when enabled. `highlight` selects a section anchor to highlight
    /// in this build. Returns the rendered document.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable source, malformed directives, or
    /// any output I/O failure.
    pub fn build(&self, source_path: &Path, highlight: Option<&str>) -> Result<Document, SpecupError> {
        let source = fs::read_to_string(source_path)?;
        let mut document = self.parse(&source)?;

        if let Some(anchor) = highlight {
            if !document.highlight_section(anchor) {
                return Err(SpecupError::Render(format!(
                    "no section with anchor `{anchor}` to highlight"
                )));
            }
        }

        let downloads = probe_downloads(source_path);
        let page = self.render_page(&document, &downloads);

        let output_dir = Path::new(self.config.output().dir());
        fs::create_dir_all(output_dir)?;
        fs::write(output_dir.join("index.html"), page)?;

        if self.config.output().assets() {
            assets::write_assets(output_dir)?;
        }

        info!(
            output:? = output_dir,
            definitions = document.glossary().definitions().len();
            "Specification built"
        );
        Ok(document)
    }
}
