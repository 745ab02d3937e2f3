//! Configuration schema types
//!
//! This module defines the configuration structure for loganon.

use crate::anonymization::config::AnonymizationConfig;
use crate::core::process::task::DEFAULT_SUFFIX;
use serde::{Deserialize, Serialize};

/// Main loganon configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoganonConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Which files to process and how outputs are named
    #[serde(default)]
    pub input: InputConfig,

    /// Line pattern and field transforms
    #[serde(default, rename = "pattern")]
    pub anonymization: AnonymizationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LoganonConfig {
    /// Validates the configuration
    ///
    /// Compiles the line pattern, so a bad regex or field mapping is
    /// reported here rather than on the first file.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.anonymization.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (classify files, write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Input discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Glob pattern selecting candidate files
    #[serde(default = "default_path_pattern")]
    pub path_pattern: String,

    /// Marker appended to each source path to name its output
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path_pattern.trim().is_empty() {
            return Err("input.path_pattern cannot be empty".to_string());
        }

        if self.suffix.is_empty() {
            return Err("input.suffix cannot be empty".to_string());
        }

        if self.suffix.contains('/') || self.suffix.contains(std::path::MAIN_SEPARATOR) {
            return Err(format!(
                "input.suffix '{}' cannot contain a path separator",
                self.suffix
            ));
        }

        Ok(())
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path_pattern: default_path_pattern(),
            suffix: default_suffix(),
        }
    }
}

/// Log file rotation strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Daily,
    Hourly,
    Never,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default)]
    pub local_rotation: LogRotation,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: LogRotation::default(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_path_pattern() -> String {
    "/var/log/radius/radius.log*".to_string()
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}
