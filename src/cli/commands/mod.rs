//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod init;
pub mod run;
pub mod status;
pub mod validate;

use crate::config::{finalize, load_config, LoganonConfig};
use crate::domain::Result;
use std::path::Path;

/// Load the configuration file, or fall back to built-in defaults
///
/// The fallback only applies when the file does not exist and an input
/// pattern was given on the command line.
pub(crate) fn resolve_config(config_path: &str, input: Option<&str>) -> Result<LoganonConfig> {
    if input.is_some() && !Path::new(config_path).exists() {
        tracing::info!(
            config_path = %config_path,
            "Configuration file not found, using built-in defaults"
        );
        return finalize(LoganonConfig::default());
    }
    load_config(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_without_input_is_error() {
        assert!(resolve_config("/nonexistent/loganon.toml", None).is_err());
    }

    #[test]
    fn test_missing_file_with_input_uses_defaults() {
        let config = resolve_config("/nonexistent/loganon.toml", Some("/tmp/*.log")).unwrap();
        assert_eq!(config.input.suffix, "_anon");
    }
}
