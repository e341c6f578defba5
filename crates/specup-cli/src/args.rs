//! Command-line argument definitions for the specup CLI.
//!
//! This module defines the [`Args`] structure parsed from the command
//! line using [`clap`]. The tool has two subcommands: `build` renders
//! the specification page, `freeze` snapshots the current page as the
//! next version.

use clap::{Parser, Subcommand};

/// Command-line arguments for the specup specification tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// The available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the specification Markdown into the output directory
    Build {
        /// Path to the Markdown source file
        #[arg(default_value = "spec.md")]
        input: String,

        /// Path to configuration file (TOML)
        #[arg(short, long)]
        config: Option<String>,

        /// Anchor of a section to highlight in this build
        #[arg(long)]
        highlight: Option<String>,
    },

    /// Snapshot the current page as the next version
    Freeze {
        /// Output directory holding index.html; defaults to the
        /// configured output directory
        #[arg(short, long)]
        dir: Option<String>,

        /// Path to configuration file (TOML)
        #[arg(short, long)]
        config: Option<String>,
    },
}

impl Command {
    /// The Markdown input file this command reads, if any.
    pub fn input_path(&self) -> Option<&str> {
        match self {
            Command::Build { input, .. } => Some(input),
            Command::Freeze { .. } => None,
        }
    }
}
