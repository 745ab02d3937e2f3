// Loganon - Log Field Anonymizer
// Copyright (c) 2025 Loganon Contributors
// Licensed under the MIT License

//! # Loganon - Log Field Anonymizer
//!
//! Loganon pseudonymizes sensitive fields in line-oriented log files so the
//! logs can be shared for analysis. Each configured field is replaced by a
//! deterministic stand-in, so the same original value always maps to the
//! same replacement across every file of a run.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Matching** named fields in each log line with one regular expression
//! - **Transforming** values: opaque SHA-256 digest, IPv4 octet remap, host-preserving URL digest
//! - **Rewriting** lines with the replacements, in global or anchored mode
//! - **Processing** files incrementally: outputs are skipped while up to date
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - File discovery, per-file processing and run reporting
//! - [`anonymization`] - Line matching, transforms, memoization and rewriting
//! - [`domain`] - Error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loganon::anonymization::AnonymizationEngine;
//! use loganon::config::load_config;
//! use loganon::core::discovery::discover;
//! use loganon::core::process::{FileProcessor, ProcessOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("loganon.toml")?;
//!     let engine = AnonymizationEngine::from_config(&config.anonymization)?;
//!     let files = discover(&config.input.path_pattern)?;
//!
//!     let options = ProcessOptions {
//!         suffix: config.input.suffix.clone(),
//!         ..Default::default()
//!     };
//!     let summary = FileProcessor::new(engine, options).run(&files);
//!
//!     println!("Anonymized {} files", summary.files_processed);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Consistent Pseudonyms
//!
//! One [`anonymization::TransformRegistry`] lives for the whole run, so a
//! value seen in several files gets the same replacement in all of them:
//!
//! ```rust
//! use loganon::anonymization::{TransformKind, TransformRegistry};
//!
//! let mut registry = TransformRegistry::new();
//! let first = registry.transform(TransformKind::Ip, "10.0.0.1");
//! let again = registry.transform(TransformKind::Ip, "10.0.0.1");
//! assert_eq!(first, again);
//! assert_eq!(first, b"40.0.0.1");
//! ```
//!
//! ### Incremental Runs
//!
//! The output of `radius.log` is `radius.log_anon`. A source is skipped
//! when its output is at least as new as the source, and files already
//! carrying the suffix are never processed, so re-running is cheap.
//!
//! ## Error Handling
//!
//! Loganon uses the [`domain::LoganonError`] type for all errors:
//!
//! ```rust,no_run
//! use loganon::domain::LoganonError;
//!
//! fn example() -> Result<(), LoganonError> {
//!     let config = loganon::config::load_config("loganon.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! Per-file failures never abort a run; they are recorded in the
//! [`core::process::RunSummary`].

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
