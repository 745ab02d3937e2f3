//! Domain error types
//!
//! This module defines the error hierarchy for loganon.
//! Errors are domain-specific and don't expose third-party types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main loganon error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum LoganonError {
    /// Configuration-related errors (missing field mappings, bad values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Line pattern compilation errors
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Well-formed configuration that fails validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Per-file processing errors
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised while anonymizing a single file
///
/// Each variant carries the path involved so the run summary can report
/// exactly which side of the task failed.
#[derive(Debug, Error)]
pub enum FileError {
    /// The source file could not be opened
    #[error("cannot open source {path}: {message}")]
    OpenSource { path: PathBuf, message: String },

    /// The destination (or its temporary file) could not be created
    #[error("cannot create destination {path}: {message}")]
    CreateDestination { path: PathBuf, message: String },

    /// Reading from the source failed mid-stream
    #[error("read failed on {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Writing to the temporary output failed mid-stream
    #[error("write failed on {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// The finished output could not be moved onto the destination
    #[error("cannot commit output to {path}: {message}")]
    Commit { path: PathBuf, message: String },
}

impl FileError {
    pub fn open_source(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::OpenSource {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn create_destination(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::CreateDestination {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn read(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn write(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn commit(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Commit {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Path the failure refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::OpenSource { path, .. }
            | Self::CreateDestination { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Commit { path, .. } => path,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for LoganonError {
    fn from(err: std::io::Error) -> Self {
        LoganonError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LoganonError {
    fn from(err: serde_json::Error) -> Self {
        LoganonError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LoganonError {
    fn from(err: toml::de::Error) -> Self {
        LoganonError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from regex compile errors
impl From<regex::Error> for LoganonError {
    fn from(err: regex::Error) -> Self {
        LoganonError::Pattern(err.to_string())
    }
}
