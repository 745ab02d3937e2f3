//! Per-file task classification
//!
//! A [`FileTask`] pairs a discovered source with its destination and
//! decides whether the source needs (re)processing.
//!
//! ```text
//! Discovered -> Skipped(AlreadyAnonymized)
//!            -> Skipped(UpToDate)
//!            -> Pending -> Done | Failed
//! ```

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default marker appended to source paths to name their output
pub const DEFAULT_SUFFIX: &str = "_anon";

/// Why a task was not processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The source is itself an anonymized output
    AlreadyAnonymized,
    /// The destination is at least as new as the source
    UpToDate,
}

/// Lifecycle state of a file task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum TaskState {
    /// Needs processing
    Pending,
    /// Not processed
    Skipped(SkipReason),
    /// Output committed
    Done,
    /// Processing failed; the message describes the cause
    Failed(String),
    /// Not started because the run was interrupted
    Cancelled,
}

impl TaskState {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Skipped(SkipReason::AlreadyAnonymized) => f.write_str("skipped (already anonymized)"),
            Self::Skipped(SkipReason::UpToDate) => f.write_str("skipped (up to date)"),
            Self::Done => f.write_str("done"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// One discovered source file and its destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub state: TaskState,
}

impl FileTask {
    /// Classify `source` against its destination
    ///
    /// A source whose file name already ends with `suffix` is never
    /// reprocessed, whatever the timestamps say. Otherwise the task is
    /// skipped when the destination exists and is not older than the
    /// source, unless `force` is set.
    pub fn classify(source: &Path, suffix: &str, force: bool) -> Self {
        let destination = destination_for(source, suffix);

        let state = if is_anonymized_output(source, suffix) {
            TaskState::Skipped(SkipReason::AlreadyAnonymized)
        } else if !force && is_up_to_date(source, &destination) {
            TaskState::Skipped(SkipReason::UpToDate)
        } else {
            TaskState::Pending
        };

        Self {
            source: source.to_path_buf(),
            destination,
            state,
        }
    }

    pub fn needs_processing(&self) -> bool {
        self.state == TaskState::Pending
    }
}

/// `source` with `suffix` appended to its final component
pub fn destination_for(source: &Path, suffix: &str) -> PathBuf {
    let mut os: OsString = source.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

/// Whether the file name carries the output suffix
pub fn is_anonymized_output(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(suffix))
        .unwrap_or(false)
}

/// Destination exists and `mtime(destination) >= mtime(source)`
///
/// Missing metadata on either side means "not up to date", so the source
/// gets reprocessed and any real I/O problem surfaces there.
pub fn is_up_to_date(source: &Path, destination: &Path) -> bool {
    let modified = |p: &Path| fs::metadata(p).and_then(|m| m.modified()).ok();

    match (modified(source), modified(destination)) {
        (Some(src), Some(dst)) => dst >= src,
        _ => false,
    }
}
