//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the loganon configuration file, including its line pattern.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates, pattern included
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Input Pattern: {}", config.input.path_pattern);
        println!("  Output Suffix: {}", config.input.suffix);
        println!("  Line Pattern: {}", config.anonymization.regex);
        println!("  Substitution: {}", config.anonymization.substitution);
        println!("  Unmatched Lines: {}", config.anonymization.unmatched);
        println!("  Fields:");
        for (name, kind) in &config.anonymization.fields {
            println!("    {name} -> {kind}");
        }
        if config.logging.local_enabled {
            println!("  Log Directory: {}", config.logging.local_path);
        }
        println!();
        Ok(0)
    }
}
