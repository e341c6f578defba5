//! Specup CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use specup_cli::{Args, error_adapter};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Parse configuration first
    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting specup");
    debug!(args:?; "Parsed arguments");

    // Run the application
    if let Err(err) = specup_cli::run(&args) {
        // Scan failures are reported against the file being built
        let source_name = args.command.input_path().unwrap_or("spec.md");

        for report in error_adapter::render_reports(&err, source_name) {
            error!("{report}");
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
