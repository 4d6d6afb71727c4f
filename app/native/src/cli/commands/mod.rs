//! CLI command definitions using Clap.
//!
//! This module defines all CLI commands and their arguments, organized into
//! domain-specific submodules:
//!
//! - `config_cmd` - Configuration file commands
//! - `layout` - Board inspection and editing commands
//! - `types` - Shared types used across commands

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::BentoError;
use crate::{config, schema};

pub mod config_cmd;
pub mod layout;
pub mod types;

pub use config_cmd::ConfigCommands;
pub use layout::LayoutCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bento CLI - Lay out, shuffle and edit a bento tile grid.
#[derive(Parser, Debug)]
#[command(name = "bento")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter for engine diagnostics (e.g. "debug", "trace").
    ///
    /// Overrides `RUST_LOG`. Logs are written to stderr.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Board commands.
    ///
    /// Show, shuffle and edit the board for a viewport mode.
    #[command(subcommand)]
    Layout(LayoutCommands),

    /// Configuration file management commands.
    ///
    /// Initialize, view, and locate the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output Bento configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// Bento configuration file. Can be redirected to a file for use with
    /// editors that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(bento completions --shell zsh)"
    ///   bento completions --shell fish > ~/.config/fish/completions/bento.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), BentoError> {
        if let Some(ref path) = self.config {
            if !path.exists() {
                return Err(BentoError::ConfigError(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            config::set_custom_config_path(path.clone());
        }

        match &self.command {
            Commands::Layout(cmd) => layout::execute(cmd),
            Commands::Config(cmd) => config_cmd::execute(cmd),

            Commands::Schema => {
                println!("{}", schema::print_schema());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "bento", &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::types::{CliEdge, CliMode};
    use super::*;

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["bento", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_completions_zsh() {
        let cli = Cli::try_parse_from(["bento", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_layout_show_mode() {
        let cli = Cli::try_parse_from(["bento", "layout", "show", "--mode", "mobile", "--json"])
            .unwrap();
        match cli.command {
            Commands::Layout(LayoutCommands::Show { board }) => {
                assert_eq!(board.mode, Some(CliMode::Mobile));
                assert!(board.json);
            }
            _ => panic!("Expected Layout Show command"),
        }
    }

    #[test]
    fn test_cli_rejects_mode_and_width_together() {
        let result =
            Cli::try_parse_from(["bento", "layout", "show", "--mode", "mobile", "--width", "900"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_layout_shuffle_seed() {
        let cli = Cli::try_parse_from(["bento", "layout", "shuffle", "--seed", "42"]).unwrap();
        match cli.command {
            Commands::Layout(LayoutCommands::Shuffle { seed, .. }) => assert_eq!(seed, Some(42)),
            _ => panic!("Expected Layout Shuffle command"),
        }
    }

    #[test]
    fn test_cli_parses_negative_move() {
        let cli = Cli::try_parse_from(["bento", "layout", "move", "photos", "-1", "2"]).unwrap();
        match cli.command {
            Commands::Layout(LayoutCommands::Move { id, cols, rows, .. }) => {
                assert_eq!(id, "photos");
                assert_eq!((cols, rows), (-1, 2));
            }
            _ => panic!("Expected Layout Move command"),
        }
    }

    #[test]
    fn test_cli_parses_resize_edge() {
        let cli =
            Cli::try_parse_from(["bento", "layout", "resize", "bio", "sw", "-1", "1"]).unwrap();
        match cli.command {
            Commands::Layout(LayoutCommands::Resize { edge, .. }) => assert_eq!(edge, CliEdge::Sw),
            _ => panic!("Expected Layout Resize command"),
        }
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from([
            "bento",
            "config",
            "path",
            "--config",
            "/tmp/bento.jsonc",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/bento.jsonc")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Path)));
    }

    #[test]
    fn test_cli_debug_assert() { Cli::command().debug_assert(); }
}
