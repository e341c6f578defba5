//! CLI logic for the specup specification tool.
//!
//! This module contains the core CLI logic for the specup tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::path::Path;

use log::info;

use specup::{SiteBuilder, SpecupError};

/// Run the specup CLI application
///
/// Dispatches to the selected subcommand: `build` renders the
/// specification page into the output directory, `freeze` snapshots
/// the current page as the next version.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SpecupError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Directive parsing errors
/// - Rendering errors
/// - Freeze errors
pub fn run(args: &Args) -> Result<(), SpecupError> {
    match &args.command {
        Command::Build {
            input,
            config,
            highlight,
        } => {
            info!(input_path = input; "Building specification");

            let app_config = config::load_config(config.as_ref())?;
            let builder = SiteBuilder::new(app_config);
            let document = builder.build(Path::new(input), highlight.as_deref())?;

            info!(
                output_dir = builder.config().output().dir(),
                definitions = document.glossary().definitions().len();
                "Specification page written"
            );
            Ok(())
        }
        Command::Freeze { dir, config } => {
            let app_config = config::load_config(config.as_ref())?;
            let dir = dir
                .clone()
                .unwrap_or_else(|| app_config.output().dir().to_string());

            info!(dir = dir.as_str(); "Freezing specification snapshot");

            let version = specup::freeze(Path::new(&dir))?;

            info!(version = version.to_string().as_str(); "Snapshot created");
            Ok(())
        }
    }
}
