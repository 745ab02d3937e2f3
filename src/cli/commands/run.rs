//! Run command implementation
//!
//! This module implements the `run` command, which anonymizes every
//! candidate file matched by the input pattern.

use super::resolve_config;
use crate::anonymization::rewriter::SubstitutionMode;
use crate::anonymization::AnonymizationEngine;
use crate::core::discovery::discover;
use crate::core::process::{FileProcessor, FileReport, ProcessOptions, RunSummary, TaskState};
use crate::log_error_with_context;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Override the input glob pattern
    #[arg(short, long, value_name = "GLOB")]
    pub input: Option<String>,

    /// Classify files and report what would be done, without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Reprocess files even when their output is up to date
    #[arg(long)]
    pub force: bool,

    /// Override the substitution mode (global or anchored)
    #[arg(long, value_name = "MODE")]
    pub substitution: Option<SubstitutionMode>,

    /// Write the run summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let mut config = match resolve_config(config_path, self.input.as_deref()) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        // Apply CLI overrides
        if let Some(input) = &self.input {
            tracing::info!(input = %input, "Overriding input pattern from CLI");
            config.input.path_pattern = input.clone();
        }
        if let Some(mode) = self.substitution {
            tracing::info!(mode = %mode, "Overriding substitution mode from CLI");
            config.anonymization.substitution = mode;
        }
        if self.dry_run {
            config.application.dry_run = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Validation error: {e}");
            return Ok(2);
        }

        let engine = match AnonymizationEngine::from_config(&config.anonymization) {
            Ok(engine) => engine,
            Err(e) => {
                log_error_with_context!(&e, "Failed to build line matcher");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let files = match discover(&config.input.path_pattern) {
            Ok(files) => files,
            Err(e) => {
                log_error_with_context!(&e, "Failed to expand input pattern");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if files.is_empty() {
            println!("No files match {}", config.input.path_pattern);
        }

        let options = ProcessOptions {
            suffix: config.input.suffix.clone(),
            force: self.force,
            dry_run: config.application.dry_run,
        };

        if options.dry_run {
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let mut processor =
            FileProcessor::new(engine, options).with_shutdown_signal(shutdown_signal);
        let summary =
            tokio::task::spawn_blocking(move || processor.run_with(&files, print_file_report))
                .await
                .context("File processing task panicked")?;

        print_summary(&summary);

        if let Some(path) = &self.report {
            let json = summary.to_json()?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("📄 Report written to {}", path.display());
        }

        Ok(exit_code(&summary))
    }
}

fn print_file_report(file: &FileReport) {
    match &file.state {
        TaskState::Done => println!(
            "  ✅ {} -> {} ({} lines, {} matched)",
            file.source.display(),
            file.destination.display(),
            file.lines.total,
            file.lines.matched
        ),
        TaskState::Pending => println!(
            "  ➡️  {} -> {} (would process)",
            file.source.display(),
            file.destination.display()
        ),
        TaskState::Failed(message) => {
            println!("  ❌ {}: {}", file.source.display(), message)
        }
        state => println!("  ⏭️  {}: {}", file.source.display(), state),
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("📊 Run Summary:");
    println!("  Discovered: {}", summary.files_discovered);
    if summary.dry_run {
        println!("  Would process: {}", summary.files_pending);
    } else {
        println!("  Processed: {}", summary.files_processed);
    }
    println!("  Skipped (anonymized output): {}", summary.files_skipped_anonymized);
    println!("  Skipped (up to date): {}", summary.files_skipped_up_to_date);
    println!("  Failed: {}", summary.files_failed);
    if summary.files_cancelled > 0 {
        println!("  Cancelled: {}", summary.files_cancelled);
    }
    println!(
        "  Lines: {} read, {} rewritten, {} passed through, {} dropped",
        summary.lines.total, summary.lines.matched, summary.lines.unmatched, summary.lines.dropped
    );
    for (kind, stats) in &summary.transforms {
        if stats.entries > 0 {
            println!("  Distinct {} values: {}", kind, stats.entries);
        }
    }
    println!("  Duration: {:.2}s", summary.duration_ms as f64 / 1000.0);
    println!();

    if summary.interrupted {
        println!("⚠️  Run interrupted. Re-run the same command to continue.");
    } else if summary.files_failed > 0 {
        println!("⚠️  Run completed with failures");
    } else {
        println!("✅ Run completed successfully!");
    }
}

/// Exit code for a finished run
pub fn exit_code(summary: &RunSummary) -> i32 {
    if summary.interrupted {
        3
    } else if summary.files_failed > 0 {
        1
    } else {
        0
    }
}
