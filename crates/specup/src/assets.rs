//! Static assets shipped with every generated page.
//!
//! The stylesheet and interaction script are compiled into the binary
//! and written into `assets/` under the output directory, so a build
//! needs no network access and the output directory is self-contained.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::SpecupError;

const MAIN_CSS: &str = include_str!("../assets/main.css");
const INTERACTIONS_JS: &str = include_str!("../assets/interactions.js");

/// Writes the static assets into `output_dir/assets/`.
///
/// Existing files are overwritten so the assets always match the
/// generating binary.
pub fn write_assets(output_dir: &Path) -> Result<(), SpecupError> {
    let assets_dir = output_dir.join("assets");
    fs::create_dir_all(&assets_dir)?;

    fs::write(assets_dir.join("main.css"), MAIN_CSS)?;
    fs::write(assets_dir.join("interactions.js"), INTERACTIONS_JS)?;

    debug!(dir:? = assets_dir; "Wrote static assets");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_assets_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();

        write_assets(dir.path()).unwrap();

        let css = fs::read_to_string(dir.path().join("assets/main.css")).unwrap();
        let js = fs::read_to_string(dir.path().join("assets/interactions.js")).unwrap();
        assert!(css.contains(".section-highlight"));
        assert!(js.contains("specup-font-size"));
    }

    #[test]
    fn test_write_assets_overwrites_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/main.css"), "stale").unwrap();

        write_assets(dir.path()).unwrap();

        let css = fs::read_to_string(dir.path().join("assets/main.css")).unwrap();
        assert_ne!(css, "stale");
    }
}
