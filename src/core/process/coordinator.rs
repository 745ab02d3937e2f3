//! File processor
//!
//! Drives a run: classifies each discovered file, then streams pending
//! files line by line through the anonymization engine into atomically
//! committed outputs. Files are handled strictly one at a time and lines
//! strictly in order.

use crate::anonymization::engine::{AnonymizationEngine, LineOutcome};
use crate::core::process::summary::{FileReport, LineStats, RunSummary};
use crate::core::process::task::{FileTask, TaskState};
use crate::core::process::writer::AtomicOutput;
use crate::domain::FileError;
use crate::{log_file_complete, log_file_skipped};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::watch;

/// Options controlling a run
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Marker appended to source paths to name outputs
    pub suffix: String,
    /// Reprocess even when the output is up to date
    pub force: bool,
    /// Classify only; write nothing
    pub dry_run: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            suffix: crate::core::process::task::DEFAULT_SUFFIX.to_string(),
            force: false,
            dry_run: false,
        }
    }
}

/// Sequential file processor
///
/// Holds the engine, and with it the transform tables, for the whole run.
pub struct FileProcessor {
    engine: AnonymizationEngine,
    options: ProcessOptions,
    shutdown_signal: Option<watch::Receiver<bool>>,
}

impl FileProcessor {
    pub fn new(engine: AnonymizationEngine, options: ProcessOptions) -> Self {
        Self {
            engine,
            options,
            shutdown_signal: None,
        }
    }

    /// Stop between files once the channel carries `true`
    pub fn with_shutdown_signal(mut self, shutdown_signal: watch::Receiver<bool>) -> Self {
        self.shutdown_signal = Some(shutdown_signal);
        self
    }

    pub fn engine(&self) -> &AnonymizationEngine {
        &self.engine
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_signal
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }

    /// Classify `source` without touching the filesystem beyond metadata
    pub fn classify(&self, source: &Path) -> FileTask {
        FileTask::classify(source, &self.options.suffix, self.options.force)
    }

    /// Process every path in order and summarize the outcomes
    ///
    /// A failing file never aborts the run; it is recorded and the next
    /// path is taken.
    pub fn run(&mut self, paths: &[PathBuf]) -> RunSummary {
        self.run_with(paths, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_file` with each file's report as
    /// soon as that file is settled
    ///
    /// The shutdown signal is checked after `on_file` returns, before the
    /// next file is classified.
    pub fn run_with<F>(&mut self, paths: &[PathBuf], mut on_file: F) -> RunSummary
    where
        F: FnMut(&FileReport),
    {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(self.options.dry_run);
        summary.files_discovered = paths.len();

        tracing::info!(
            files = paths.len(),
            dry_run = self.options.dry_run,
            force = self.options.force,
            "Starting anonymization run"
        );

        for source in paths {
            let mut task = self.classify(source);

            let report = if summary.interrupted || self.is_shutdown_requested() {
                if !summary.interrupted {
                    tracing::info!("Shutdown requested, leaving remaining files untouched");
                    summary.interrupted = true;
                }
                if task.needs_processing() {
                    task.state = TaskState::Cancelled;
                }
                FileReport::from_task(&task)
            } else if !task.needs_processing() {
                log_file_skipped!(&task.source, &task.state);
                FileReport::from_task(&task)
            } else if self.options.dry_run {
                tracing::info!(source = %task.source.display(), "Would process (dry run)");
                FileReport::from_task(&task)
            } else {
                self.process_task(&task)
            };

            on_file(&report);
            summary.record(report);
        }

        summary.transforms = self.engine.registry_stats();
        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        summary
    }

    /// Anonymize one pending task into its destination
    pub fn process_task(&mut self, task: &FileTask) -> FileReport {
        let start = Instant::now();
        tracing::info!(
            source = %task.source.display(),
            destination = %task.destination.display(),
            "Processing file"
        );

        match self.anonymize_file(&task.source, &task.destination) {
            Ok(lines) => {
                log_file_complete!(&task.source, lines.total, start.elapsed());
                FileReport::processed(task, TaskState::Done, lines, start.elapsed())
            }
            Err(e) => {
                tracing::error!(
                    source = %task.source.display(),
                    error = %e,
                    "Failed to process file"
                );
                FileReport::processed(
                    task,
                    TaskState::Failed(e.to_string()),
                    LineStats::default(),
                    start.elapsed(),
                )
            }
        }
    }

    /// Stream `source` through the engine into `destination`
    ///
    /// Lines are raw bytes split after each `\n`; terminators and any
    /// non-UTF-8 bytes are preserved as read. The destination only
    /// changes if every line was written.
    fn anonymize_file(&mut self, source: &Path, destination: &Path) -> Result<LineStats, FileError> {
        let file = File::open(source).map_err(|e| FileError::open_source(source, e))?;
        let mut reader = BufReader::new(file);
        let mut output = AtomicOutput::create(destination)?.with_permissions_from(source);

        let mut stats = LineStats::default();
        let mut buf = Vec::with_capacity(512);
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| FileError::read(source, e))?;
            if read == 0 {
                break;
            }
            stats.total += 1;

            match self.engine.anonymize_line(&buf) {
                LineOutcome::Rewritten(bytes) => {
                    stats.matched += 1;
                    output.write_bytes(&bytes)?;
                }
                LineOutcome::Unmatched(bytes) => {
                    stats.unmatched += 1;
                    output.write_bytes(bytes)?;
                }
                LineOutcome::Dropped => stats.dropped += 1,
            }
        }

        output.commit()?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::config::{AnonymizationConfig, UnmatchedPolicy};
    use crate::anonymization::anonymizer::opaque::digest as opaque_digest;
    use crate::core::process::task::SkipReason;
    use std::fs;
    use tempfile::TempDir;

    fn processor(options: ProcessOptions) -> FileProcessor {
        let engine = AnonymizationEngine::from_config(&AnonymizationConfig::default()).unwrap();
        FileProcessor::new(engine, options)
    }

    #[test]
    fn test_process_single_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("radius.log");
        fs::write(
            &source,
            "Info: Ready to process requests\n\
             Auth: Login OK: [alice] (from client ap port 0 cli 10.0.0.1)\n\
             Auth: Login incorrect: [alice] (from client ap port 0 cli 10.0.0.2)",
        )
        .unwrap();

        let mut processor = processor(ProcessOptions::default());
        let summary = processor.run(&[source.clone()]);

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.lines.total, 3);
        assert_eq!(summary.lines.matched, 2);
        assert_eq!(summary.lines.unmatched, 1);

        let hash = opaque_digest("alice");
        let output = fs::read_to_string(dir.path().join("radius.log_anon")).unwrap();
        assert_eq!(
            output,
            format!(
                "Info: Ready to process requests\n\
                 Auth: Login OK: [{hash}] (from client ap port 0 cli 40.0.0.1)\n\
                 Auth: Login incorrect: [{hash}] (from client ap port 0 cli 40.0.0.32)"
            )
        );
    }

    #[test]
    fn test_dropped_lines_are_omitted() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("radius.log");
        fs::write(&source, "noise\nLogin OK: [bob] (from client ap port 0 cli 1.2.3.4)\nmore noise\n").unwrap();

        let config = AnonymizationConfig {
            unmatched: UnmatchedPolicy::Drop,
            ..Default::default()
        };
        let engine = AnonymizationEngine::from_config(&config).unwrap();
        let mut processor = FileProcessor::new(engine, ProcessOptions::default());
        let summary = processor.run(&[source]);

        assert_eq!(summary.lines.dropped, 2);
        let output = fs::read_to_string(dir.path().join("radius.log_anon")).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(!output.contains("noise"));
    }

    #[test]
    fn test_missing_source_fails_and_run_continues() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.log");
        let present = dir.path().join("radius.log");
        fs::write(&present, "Login OK: [bob] (from client ap port 0 cli 1.2.3.4)\n").unwrap();

        let mut processor = processor(ProcessOptions::default());
        let summary = processor.run(&[missing, present]);

        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.files_processed, 1);
        assert!(!summary.is_successful());
        assert!(dir.path().join("radius.log_anon").exists());
        assert!(!dir.path().join("gone.log_anon").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("radius.log");
        let anon = dir.path().join("old.log_anon");
        fs::write(&source, "Login OK: [bob] (from client ap port 0 cli 1.2.3.4)\n").unwrap();
        fs::write(&anon, "x\n").unwrap();

        let mut processor = processor(ProcessOptions {
            dry_run: true,
            ..Default::default()
        });
        let summary = processor.run(&[source, anon]);

        assert_eq!(summary.files_pending, 1);
        assert_eq!(summary.files_skipped_anonymized, 1);
        assert_eq!(summary.files_processed, 0);
        assert!(!dir.path().join("radius.log_anon").exists());
    }

    #[test]
    fn test_shutdown_cancels_remaining_files() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("radius.log");
        fs::write(&source, "Login OK: [bob] (from client ap port 0 cli 1.2.3.4)\n").unwrap();

        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let mut processor = processor(ProcessOptions::default()).with_shutdown_signal(rx);
        let summary = processor.run(&[source.clone()]);

        assert!(summary.interrupted);
        assert_eq!(summary.files_cancelled, 1);
        assert_eq!(summary.files[0].state, TaskState::Cancelled);
        assert!(!dir.path().join("radius.log_anon").exists());
    }

    #[test]
    fn test_non_utf8_lines_keep_their_bytes() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("radius.log");
        let input: &[u8] = b"Info: user J\xf6rg connected\n\
            Login OK: [b\xffb] (from client M\xfcnchen port 0 cli 1.2.3.4)\n";
        fs::write(&source, input).unwrap();

        let mut processor = processor(ProcessOptions::default());
        let summary = processor.run(&[source]);

        assert_eq!(summary.lines.unmatched, 1);
        assert_eq!(summary.lines.matched, 1);

        let mut expected = b"Info: user J\xf6rg connected\nLogin OK: [".to_vec();
        expected.extend_from_slice(opaque_digest(b"b\xffb").as_bytes());
        expected.extend_from_slice(b"] (from client M\xfcnchen port 0 cli 1.32.243.4)\n");
        assert_eq!(fs::read(dir.path().join("radius.log_anon")).unwrap(), expected);
    }

    #[test]
    fn test_reports_are_streamed_in_order() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("radius.log");
        let anon = dir.path().join("old.log_anon");
        fs::write(&source, "Login OK: [bob] (from client ap port 0 cli 1.2.3.4)\n").unwrap();
        fs::write(&anon, "x\n").unwrap();

        let mut seen = Vec::new();
        let summary = processor(ProcessOptions::default())
            .run_with(&[anon.clone(), source.clone()], |report| {
                seen.push((report.source.clone(), report.state.clone()));
            });

        assert_eq!(
            seen,
            vec![
                (anon, TaskState::Skipped(SkipReason::AlreadyAnonymized)),
                (source, TaskState::Done),
            ]
        );
        assert_eq!(summary.files.len(), 2);
    }

    #[test]
    fn test_skipped_outputs_are_reported() {
        let dir = TempDir::new().unwrap();
        let anon = dir.path().join("radius.log_anon");
        fs::write(&anon, "x\n").unwrap();

        let mut processor = processor(ProcessOptions::default());
        let summary = processor.run(&[anon]);

        assert_eq!(
            summary.files[0].state,
            TaskState::Skipped(SkipReason::AlreadyAnonymized)
        );
        assert!(summary.is_successful());
    }
}
