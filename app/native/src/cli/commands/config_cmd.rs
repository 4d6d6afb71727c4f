//! Config CLI commands.
//!
//! Commands for managing the Bento configuration file.

use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{self, config_paths};
use crate::error::BentoError;
use crate::modules::grid::ViewportMode;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Initialize a new configuration file with all options documented.
    ///
    /// Creates a new configuration file at the default location with all
    /// available options commented out.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  bento config init              # Create config at default location
  bento config init --force      # Overwrite existing config
  bento config init --path ~/my-config.jsonc  # Create at custom path
  bento config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses the first search path.
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the effective configuration.
    ///
    /// Prints the configuration in use after defaults are applied, and
    /// reports configuration defects for each board.
    Show,

    /// Show the path to the configuration file.
    ///
    /// Displays the paths where Bento looks for configuration files,
    /// and indicates which one is currently in use (if any).
    Path,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands) -> Result<(), BentoError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout {
                println!("{}", generate_config_template());
                Ok(())
            } else {
                init_config(*force, path.clone())
            }
        }
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
    }
}

/// Initialize a new configuration file.
fn init_config(force: bool, custom_path: Option<PathBuf>) -> Result<(), BentoError> {
    let config_path = custom_path
        .or_else(|| config_paths().into_iter().next())
        .unwrap_or_else(|| PathBuf::from("config.jsonc"));

    if config_path.exists() && !force {
        return Err(BentoError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )));
    }

    create_config_file(&config_path).map_err(|e| {
        BentoError::ConfigError(format!(
            "Failed to create config file {}: {e}",
            config_path.display()
        ))
    })?;

    println!("Configuration file created at: {}", config_path.display());
    println!("\nAll options are commented out by default.");
    println!("Edit the file and uncomment the options you want to configure.");

    Ok(())
}

/// Print the effective configuration and its defects.
fn show_config() -> Result<(), BentoError> {
    let config = config::get_config();
    match config::get_config_path() {
        Some(path) => eprintln!("{}", format!("Loaded from {}", path.display()).dimmed()),
        None => eprintln!("{}", "Using built-in defaults".dimmed()),
    }

    output::print_highlighted_json(&serde_json::to_value(config)?);

    let catalog = config.catalog();
    for mode in ViewportMode::ALL {
        for defect in catalog.validate(config.mode(mode).grid()) {
            eprintln!("{} {}: {defect}", "Warning:".yellow(), mode.as_str());
        }
    }

    Ok(())
}

/// Show the configuration file path.
fn show_config_path() {
    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;
    for (i, path) in config_paths().iter().enumerate() {
        let exists = path.exists();
        let marker = if exists && !found_config {
            found_config = true;
            " (active)"
        } else if exists {
            " (exists)"
        } else {
            ""
        };

        println!("  {}. {}{}", i + 1, path.display(), marker);
    }

    if !found_config {
        println!("\nNo configuration file found.");
        println!("Run 'bento config init' to create one.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");

        init_config(false, Some(path.clone())).unwrap();
        assert!(path.exists());

        let err = init_config(false, Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        init_config(true, Some(path)).unwrap();
    }
}
