//! Run summary and reporting
//!
//! This module defines structures for tracking and reporting run results.

use crate::anonymization::registry::RegistryStats;
use crate::core::process::task::{FileTask, SkipReason, TaskState};
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Line counters for one processed file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    /// Lines read from the source
    pub total: u64,
    /// Lines that matched the pattern and were rewritten
    pub matched: u64,
    /// Lines written through unchanged
    pub unmatched: u64,
    /// Unmatched lines left out of the output
    pub dropped: u64,
}

impl LineStats {
    pub fn add(&mut self, other: &LineStats) {
        self.total += other.total;
        self.matched += other.matched;
        self.unmatched += other.unmatched;
        self.dropped += other.dropped;
    }
}

/// Outcome of one file task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    #[serde(flatten)]
    pub state: TaskState,
    #[serde(default)]
    pub lines: LineStats,
    /// Processing time in milliseconds
    #[serde(default)]
    pub duration_ms: u64,
}

impl FileReport {
    /// Report for a task that was not processed (skipped, cancelled, or dry run)
    pub fn from_task(task: &FileTask) -> Self {
        Self {
            source: task.source.clone(),
            destination: task.destination.clone(),
            state: task.state.clone(),
            lines: LineStats::default(),
            duration_ms: 0,
        }
    }

    pub fn processed(
        task: &FileTask,
        state: TaskState,
        lines: LineStats,
        duration: Duration,
    ) -> Self {
        Self {
            source: task.source.clone(),
            destination: task.destination.clone(),
            state,
            lines,
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Summary of a run over all discovered files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Whether this was a dry run (nothing written)
    pub dry_run: bool,

    /// Whether a shutdown signal stopped the run early
    pub interrupted: bool,

    /// Number of candidate files discovered
    pub files_discovered: usize,

    /// Files whose output was committed
    pub files_processed: usize,

    /// Files skipped because they are anonymized outputs
    pub files_skipped_anonymized: usize,

    /// Files skipped because their output is current
    pub files_skipped_up_to_date: usize,

    /// Files that failed
    pub files_failed: usize,

    /// Files left untouched by an interruption
    pub files_cancelled: usize,

    /// Files a dry run would process
    pub files_pending: usize,

    /// Line counters summed over processed files
    pub lines: LineStats,

    /// Transform table counters at the end of the run
    pub transforms: RegistryStats,

    /// Duration of the run in milliseconds
    pub duration_ms: u64,

    /// Per-file outcomes in processing order
    pub files: Vec<FileReport>,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            dry_run,
            interrupted: false,
            files_discovered: 0,
            files_processed: 0,
            files_skipped_anonymized: 0,
            files_skipped_up_to_date: 0,
            files_failed: 0,
            files_cancelled: 0,
            files_pending: 0,
            lines: LineStats::default(),
            transforms: RegistryStats::new(),
            duration_ms: 0,
            files: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Record one file outcome and update the counters
    pub fn record(&mut self, report: FileReport) {
        match &report.state {
            TaskState::Pending => self.files_pending += 1,
            TaskState::Skipped(SkipReason::AlreadyAnonymized) => {
                self.files_skipped_anonymized += 1
            }
            TaskState::Skipped(SkipReason::UpToDate) => self.files_skipped_up_to_date += 1,
            TaskState::Done => self.files_processed += 1,
            TaskState::Failed(_) => self.files_failed += 1,
            TaskState::Cancelled => self.files_cancelled += 1,
        }
        self.lines.add(&report.lines);
        self.files.push(report);
    }

    /// Check if the run completed without failures or interruption
    pub fn is_successful(&self) -> bool {
        self.files_failed == 0 && !self.interrupted
    }

    /// Failed files with their error messages
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().filter_map(|f| match &f.state {
            TaskState::Failed(msg) => Some((f.source.as_path(), msg.as_str())),
            _ => None,
        })
    }

    /// Serialize the summary as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            discovered = self.files_discovered,
            processed = self.files_processed,
            skipped_anonymized = self.files_skipped_anonymized,
            skipped_up_to_date = self.files_skipped_up_to_date,
            failed = self.files_failed,
            cancelled = self.files_cancelled,
            lines_total = self.lines.total,
            lines_matched = self.lines.matched,
            duration_ms = self.duration_ms,
            "Run completed"
        );

        for (kind, stats) in &self.transforms {
            tracing::debug!(
                transform = %kind,
                entries = stats.entries,
                hits = stats.hits,
                misses = stats.misses,
                "Transform table"
            );
        }

        if self.files_failed > 0 {
            tracing::warn!(failed = self.files_failed, "Run completed with failures");
            for (source, message) in self.failures() {
                tracing::warn!(source = %source.display(), error = %message, "File failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(state: TaskState) -> FileTask {
        FileTask {
            source: PathBuf::from("/logs/radius.log"),
            destination: PathBuf::from("/logs/radius.log_anon"),
            state,
        }
    }

    #[test]
    fn test_record_updates_counters() {
        let mut summary = RunSummary::new(false);
        let lines = LineStats {
            total: 10,
            matched: 7,
            unmatched: 3,
            ..Default::default()
        };

        summary.record(FileReport::processed(
            &task(TaskState::Pending),
            TaskState::Done,
            lines,
            Duration::from_millis(5),
        ));
        summary.record(FileReport::from_task(&task(TaskState::Skipped(
            SkipReason::UpToDate,
        ))));
        summary.record(FileReport::processed(
            &task(TaskState::Pending),
            TaskState::Failed("cannot open".into()),
            LineStats::default(),
            Duration::ZERO,
        ));

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_skipped_up_to_date, 1);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.lines.matched, 7);
        assert!(!summary.is_successful());
        assert_eq!(summary.failures().count(), 1);
    }

    #[test]
    fn test_interrupted_is_not_successful() {
        let mut summary = RunSummary::new(false);
        assert!(summary.is_successful());
        summary.interrupted = true;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_json_report() {
        let mut summary = RunSummary::new(true);
        summary.record(FileReport::from_task(&task(TaskState::Pending)));

        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["files_pending"], 1);
        assert_eq!(json["files"][0]["state"], "pending");
        assert_eq!(json["files"][0]["source"], "/logs/radius.log");
    }
}
