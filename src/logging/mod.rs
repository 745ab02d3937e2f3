//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Human-readable console output on stderr
//! - JSON file logging with rotation
//!
//! Only paths, counts and states are logged. Field values, original or
//! anonymized, never are.
//!
//! # Example
//!
//! ```no_run
//! use loganon::logging::init_logging;
//! use loganon::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a file that was not processed
///
/// # Example
///
/// ```no_run
/// use loganon::log_file_skipped;
/// use loganon::core::process::{SkipReason, TaskState};
/// use std::path::Path;
///
/// let state = TaskState::Skipped(SkipReason::UpToDate);
/// log_file_skipped!(Path::new("/var/log/radius/radius.log"), &state);
/// ```
#[macro_export]
macro_rules! log_file_skipped {
    ($source:expr, $state:expr) => {
        tracing::info!(
            source = %$source.display(),
            state = %$state,
            "Skipping file"
        );
    };
}

/// Log the completion of one file
///
/// # Example
///
/// ```no_run
/// use loganon::log_file_complete;
/// use std::path::Path;
/// use std::time::Duration;
///
/// log_file_complete!(Path::new("/var/log/radius/radius.log"), 1200, Duration::from_millis(35));
/// ```
#[macro_export]
macro_rules! log_file_complete {
    ($source:expr, $lines:expr, $duration:expr) => {
        tracing::info!(
            source = %$source.display(),
            lines = $lines,
            duration_ms = $duration.as_millis() as u64,
            "File anonymized"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use loganon::log_error_with_context;
/// use loganon::domain::LoganonError;
///
/// let error = LoganonError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
