//! Candidate file discovery
//!
//! Expands the configured glob pattern into the list of regular files to
//! consider. Expansion order is whatever `glob` yields; nothing downstream
//! depends on it.

use crate::domain::{LoganonError, Result};
use std::path::PathBuf;

/// Expand `pattern` into regular files
///
/// Entries the glob walker cannot read are logged and skipped; directories
/// and other non-files are ignored.
///
/// # Errors
///
/// Returns a configuration error if the pattern itself is invalid.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| {
        LoganonError::Configuration(format!("Invalid input path pattern '{pattern}': {e}"))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Ignoring non-file match");
            }
            Err(e) => {
                tracing::warn!(
                    path = %e.path().display(),
                    error = %e.error(),
                    "Cannot read glob entry"
                );
            }
        }
    }

    tracing::debug!(pattern = %pattern, count = files.len(), "Discovered candidate files");
    Ok(files)
}
