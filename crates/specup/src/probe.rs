//! Download-link probing.
//!
//! A published specification often ships alongside exported PDF/DOCX
//! renditions. The toolbar only offers a download button when the file
//! actually exists next to the Markdown source, so stale links never
//! reach the page.

use std::path::Path;

use log::debug;

/// An alternative rendition format offered for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Pdf,
    Docx,
}

impl DownloadFormat {
    /// All formats probed for, in toolbar order.
    pub const ALL: [DownloadFormat; 2] = [DownloadFormat::Pdf, DownloadFormat::Docx];

    /// File extension of this format.
    pub fn extension(self) -> &'static str {
        match self {
            DownloadFormat::Pdf => "pdf",
            DownloadFormat::Docx => "docx",
        }
    }

    /// Button label of this format.
    pub fn label(self) -> &'static str {
        match self {
            DownloadFormat::Pdf => "PDF",
            DownloadFormat::Docx => "DOCX",
        }
    }
}

/// A download button target that was verified to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    format: DownloadFormat,
    file_name: String,
}

impl DownloadLink {
    /// The rendition format.
    pub fn format(&self) -> DownloadFormat {
        self.format
    }

    /// The link target, relative to the page.
    pub fn href(&self) -> &str {
        &self.file_name
    }

    /// The button label.
    pub fn label(&self) -> &str {
        self.format.label()
    }
}

/// Probes for rendition files next to the Markdown source.
///
/// For a source `spec.md`, checks `spec.pdf` and `spec.docx` in the
/// same directory and returns a link for each file found.
pub fn probe_downloads(source_path: &Path) -> Vec<DownloadLink> {
    let mut links = Vec::new();

    for format in DownloadFormat::ALL {
        let candidate = source_path.with_extension(format.extension());
        if candidate.is_file() {
            let Some(file_name) = candidate.file_name() else {
                continue;
            };
            let file_name = file_name.to_string_lossy().into_owned();
            debug!(file = file_name.as_str(); "Found download rendition");
            links.push(DownloadLink { format, file_name });
        } else {
            debug!(file:? = candidate; "No download rendition");
        }
    }

    links
}
