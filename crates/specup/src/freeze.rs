//! Frozen snapshots of the published page.
//!
//! Freezing copies the current `index.html` into the next `vN`
//! directory under the output root and regenerates `versions.html`, the
//! index of all snapshots. The directory names on disk are the only
//! version state; see [`VersionDir`] for how the next number is found.

use std::fs;
use std::path::Path;

use log::info;

use specup_core::version::VersionDir;

use crate::error::SpecupError;

/// Freezes the current page as the next version snapshot.
///
/// Reads the `vN` directory names under `output_dir`, copies
/// `index.html` into the following version directory, and rewrites
/// `versions.html`. Returns the created version.
///
/// # Errors
///
/// Fails when `index.html` does not exist yet, when the computed
/// version directory is already present, or on any I/O error.
pub fn freeze(output_dir: &Path) -> Result<VersionDir, SpecupError> {
    let index = output_dir.join("index.html");
    if !index.is_file() {
        return Err(SpecupError::Freeze(format!(
            "nothing to freeze: `{}` does not exist, build the specification first",
            index.display()
        )));
    }

    let existing = version_dirs(output_dir)?;
    let next = VersionDir::next_after(existing.iter().map(ToString::to_string));

    let snapshot_dir = output_dir.join(next.to_string());
    if snapshot_dir.exists() {
        // next_after returned max+1, so this only happens when a file
        // (not a directory) squats on the name
        return Err(SpecupError::Freeze(format!(
            "refusing to overwrite existing `{}`",
            snapshot_dir.display()
        )));
    }

    fs::create_dir_all(&snapshot_dir)?;
    fs::copy(&index, snapshot_dir.join("index.html"))?;

    let mut all = existing;
    all.push(next);
    write_versions_index(output_dir, &all)?;

    info!(version = next.to_string().as_str(); "Froze specification snapshot");
    Ok(next)
}

/// Collects the version directories already present under `dir`.
fn version_dirs(dir: &Path) -> Result<Vec<VersionDir>, SpecupError> {
    let mut versions = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Ok(version) = entry.file_name().to_string_lossy().parse::<VersionDir>() {
            versions.push(version);
        }
    }

    versions.sort();
    Ok(versions)
}

/// Rewrites `versions.html`, newest snapshot first.
fn write_versions_index(output_dir: &Path, versions: &[VersionDir]) -> Result<(), SpecupError> {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n<title>Versions</title>\n</head>\n<body>\n\
         <h1>Versions</h1>\n<ul class=\"version-list\">\n",
    );

    html.push_str("<li><a href=\"index.html\">current</a></li>\n");
    for version in versions.iter().rev() {
        html.push_str(&format!(
            "<li><a href=\"{version}/index.html\">{version}</a></li>\n"
        ));
    }
    html.push_str("</ul>\n</body>\n</html>\n");

    fs::write(output_dir.join("versions.html"), html)?;
    Ok(())
}
