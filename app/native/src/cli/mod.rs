//! CLI module for Bento.
//!
//! This module provides the command-line interface for driving the layout
//! engine: inspecting presets, shuffling, replaying drags, and managing the
//! configuration file.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;
use tracing_subscriber::prelude::*;

use crate::error::BentoError;

/// Filter used when neither `--log-level` nor `RUST_LOG` is given.
const DEFAULT_LOG_FILTER: &str = "bento_lib=warn";

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), BentoError> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    cli.execute()
}

/// Installs the stderr subscriber.
///
/// `--log-level` wins over `RUST_LOG`, which wins over the default filter.
fn init_tracing(level: Option<&str>) {
    let env_filter = level
        .map(|level| format!("bento_lib={level}"))
        .map_or_else(
            || {
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
            },
            tracing_subscriber::EnvFilter::new,
        );

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init()
        .ok();
}
