//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for loganon using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// loganon - Log Field Anonymizer
#[derive(Parser, Debug)]
#[command(name = "loganon")]
#[command(version, about, long_about = None)]
#[command(author = "Loganon Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "loganon.toml", env = "LOGANON_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOGANON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize every candidate file matched by the input pattern
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show what a run would do with each candidate file
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["loganon", "run"]);
        assert_eq!(cli.config, "loganon.toml");
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["loganon", "--config", "custom.toml", "run"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["loganon", "-l", "debug", "run", "--dry-run"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        match cli.command {
            Commands::Run(args) => assert!(args.dry_run),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["loganon", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["loganon", "status", "--input", "/tmp/*.log"]);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["loganon", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_rejects_unknown_substitution() {
        let result = Cli::try_parse_from(["loganon", "run", "--substitution", "partial"]);
        assert!(result.is_err());
    }
}
