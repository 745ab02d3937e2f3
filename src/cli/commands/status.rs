//! Status command implementation
//!
//! This module implements the `status` command, which shows what a run
//! would do with each candidate file without reading or writing any of them.

use super::resolve_config;
use crate::core::discovery::discover;
use crate::core::process::{FileTask, SkipReason, TaskState};
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Override the input glob pattern
    #[arg(short, long, value_name = "GLOB")]
    pub input: Option<String>,

    /// Show what a forced run would do
    #[arg(long)]
    pub force: bool,
}

/// Per-state counts over the classified files
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub up_to_date: usize,
    pub anonymized: usize,
}

impl StatusCounts {
    pub fn from_tasks(tasks: &[FileTask]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.state {
                TaskState::Skipped(SkipReason::AlreadyAnonymized) => counts.anonymized += 1,
                TaskState::Skipped(SkipReason::UpToDate) => counts.up_to_date += 1,
                _ => counts.pending += 1,
            }
        }
        counts
    }
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking anonymization status");

        println!("📊 Anonymization Status");
        println!();

        let mut config = match resolve_config(config_path, self.input.as_deref()) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };
        if let Some(input) = &self.input {
            config.input.path_pattern = input.clone();
        }

        let files = match discover(&config.input.path_pattern) {
            Ok(files) => files,
            Err(e) => {
                println!("❌ {}", e);
                return Ok(2);
            }
        };

        if files.is_empty() {
            println!("No files match {}", config.input.path_pattern);
            return Ok(0);
        }

        let tasks: Vec<FileTask> = files
            .iter()
            .map(|path| FileTask::classify(path, &config.input.suffix, self.force))
            .collect();

        println!("Input pattern: {}", config.input.path_pattern);
        println!();
        for task in &tasks {
            let marker = if task.needs_processing() { "➡️ " } else { "⏭️ " };
            println!(
                "  {} {} -> {} [{}]",
                marker,
                task.source.display(),
                task.destination.display(),
                task.state
            );
        }

        let counts = StatusCounts::from_tasks(&tasks);
        println!();
        println!("  Would process: {}", counts.pending);
        println!("  Up to date: {}", counts.up_to_date);
        println!("  Anonymized outputs: {}", counts.anonymized);
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_status_counts() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("radius.log");
        let output = dir.path().join("other.log_anon");
        fs::write(&source, "x\n").unwrap();
        fs::write(&output, "y\n").unwrap();

        let tasks = vec![
            FileTask::classify(&source, "_anon", false),
            FileTask::classify(&output, "_anon", false),
        ];

        assert_eq!(
            StatusCounts::from_tasks(&tasks),
            StatusCounts {
                pending: 1,
                up_to_date: 0,
                anonymized: 1,
            }
        );
    }
}
