//! Core run logic for loganon.
//!
//! # Modules
//!
//! - [`discovery`] - Glob expansion into candidate files
//! - [`process`] - Task classification, streaming anonymization, and reporting
//!
//! # Run Workflow
//!
//! 1. **Discover**: Expand the input pattern into regular files
//! 2. **Classify**: Skip anonymized outputs and sources whose output is current
//! 3. **Anonymize**: Stream each pending file through one shared engine
//! 4. **Commit**: Rename each finished output into place
//! 5. **Report**: Summarize per-file outcomes and transform table counters
//!
//! # Example
//!
//! ```rust,no_run
//! use loganon::anonymization::{AnonymizationConfig, AnonymizationEngine};
//! use loganon::core::discovery::discover;
//! use loganon::core::process::{FileProcessor, ProcessOptions};
//!
//! # fn example() -> loganon::domain::Result<()> {
//! let engine = AnonymizationEngine::from_config(&AnonymizationConfig::default())?;
//! let files = discover("/var/log/radius/radius.log*")?;
//!
//! let mut processor = FileProcessor::new(engine, ProcessOptions::default());
//! let summary = processor.run(&files);
//!
//! println!("Processed: {}", summary.files_processed);
//! println!("Failed: {}", summary.files_failed);
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod process;
