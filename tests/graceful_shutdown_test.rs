//! Integration tests for graceful shutdown
//!
//! These tests verify that:
//! - A shutdown signal stops the run between files
//! - The file in progress when the signal arrives is finished and committed
//! - Files after the signal are reported as cancelled, not failed
//! - No partial output is left behind

use loganon::anonymization::{AnonymizationConfig, AnonymizationEngine};
use loganon::core::process::{FileProcessor, ProcessOptions, TaskState};
use std::path::Path;
use std::fs;
use tempfile::TempDir;
use tokio::sync::watch;

fn temp_leftovers(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count()
}

fn processor_with_signal(rx: watch::Receiver<bool>) -> FileProcessor {
    let engine = AnonymizationEngine::from_config(&AnonymizationConfig::default()).unwrap();
    FileProcessor::new(engine, ProcessOptions::default()).with_shutdown_signal(rx)
}

#[tokio::test]
async fn test_shutdown_signal_propagation() {
    let (shutdown_tx, shutdown_rx1) = watch::channel(false);
    let shutdown_rx2 = shutdown_rx1.clone();

    assert!(!*shutdown_rx1.borrow());
    assert!(!*shutdown_rx2.borrow());

    shutdown_tx.send(true).unwrap();

    assert!(*shutdown_rx1.borrow());
    assert!(*shutdown_rx2.borrow());
}

#[tokio::test]
async fn test_no_signal_processes_everything() {
    let dir = TempDir::new().unwrap();
    let files: Vec<_> = (0..3)
        .map(|i| {
            let path = dir.path().join(format!("radius.log.{i}"));
            fs::write(&path, "Login OK: [alice] (from client ap port 0 cli 10.0.0.1)\n").unwrap();
            path
        })
        .collect();

    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut processor = processor_with_signal(shutdown_rx);
    let summary = tokio::task::spawn_blocking(move || processor.run(&files))
        .await
        .unwrap();

    assert!(!summary.interrupted);
    assert_eq!(summary.files_processed, 3);
    assert!(summary.is_successful());
}

#[tokio::test]
async fn test_signal_before_run_cancels_all_pending_files() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("radius.log");
    let output = dir.path().join("old.log_anon");
    fs::write(&source, "Login OK: [alice] (from client ap port 0 cli 10.0.0.1)\n").unwrap();
    fs::write(&output, "x\n").unwrap();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    shutdown_tx.send(true).unwrap();

    let mut processor = processor_with_signal(shutdown_rx);
    let files = vec![source, output];
    let summary = tokio::task::spawn_blocking(move || processor.run(&files))
        .await
        .unwrap();

    assert!(summary.interrupted);
    assert!(!summary.is_successful());
    assert_eq!(summary.files_cancelled, 1);
    assert_eq!(summary.files_failed, 0);
    // Skips are still reported as skips
    assert_eq!(summary.files_skipped_anonymized, 1);
    assert_eq!(summary.files[0].state, TaskState::Cancelled);
    assert!(!dir.path().join("radius.log_anon").exists());
    assert_eq!(temp_leftovers(dir.path()), 0);
}

#[tokio::test]
async fn test_signal_during_run_finishes_current_file_and_cancels_the_rest() {
    let dir = TempDir::new().unwrap();
    let files: Vec<_> = (1..=3)
        .map(|i| {
            let path = dir.path().join(format!("radius.log.{i}"));
            fs::write(&path, "Login OK: [alice] (from client ap port 0 cli 10.0.0.1)\n").unwrap();
            path
        })
        .collect();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut processor = processor_with_signal(shutdown_rx);
    let summary = tokio::task::spawn_blocking(move || {
        // Signal arrives once the first file has been settled
        processor.run_with(&files, |_| {
            let _ = shutdown_tx.send(true);
        })
    })
    .await
    .unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.files_cancelled, 2);
    assert_eq!(summary.files[0].state, TaskState::Done);
    assert_eq!(summary.files[1].state, TaskState::Cancelled);
    assert_eq!(summary.files[2].state, TaskState::Cancelled);

    assert!(dir.path().join("radius.log.1_anon").exists());
    assert!(!dir.path().join("radius.log.2_anon").exists());
    assert!(!dir.path().join("radius.log.3_anon").exists());
    assert_eq!(temp_leftovers(dir.path()), 0);
}
