//! Configuration management for loganon.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! loganon uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LOGANON_<SECTION>_<KEY>` environment overrides
//! - Default values for every section
//! - Eager validation of the line pattern and its field mapping
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use loganon::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("loganon.toml")?;
//!
//! println!("Input: {}", config.input.path_pattern);
//! println!("Pattern: {}", config.anonymization.regex);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run default
//! - [`InputConfig`] - Input glob and output suffix
//! - [`AnonymizationConfig`] - Line pattern, substitution mode, unmatched policy, field transforms
//! - [`LoggingConfig`] - Optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [input]
//! path_pattern = "${RADIUS_LOG_DIR}/radius.log*"
//! suffix = "_anon"
//!
//! [pattern]
//! regex = '.*\[(?P<login>.*)\].* cli (?P<ip>[0-9.]+).*'
//! substitution = "global"
//! unmatched = "keep"
//!
//! [pattern.fields]
//! login = "opaque"
//! ip = "ip"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::anonymization::config::AnonymizationConfig;
pub use loader::{finalize, load_config, parse_config};
pub use schema::{ApplicationConfig, InputConfig, LogRotation, LoganonConfig, LoggingConfig};
