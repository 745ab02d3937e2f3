//! File processing
//!
//! This module provides the per-file pipeline of a run:
//! - Task classification (skip outputs, skip fresh destinations)
//! - Streaming line anonymization into atomically committed outputs
//! - Summary and reporting

pub mod coordinator;
pub mod summary;
pub mod task;
pub mod writer;

pub use coordinator::{FileProcessor, ProcessOptions};
pub use summary::{FileReport, LineStats, RunSummary};
pub use task::{FileTask, SkipReason, TaskState, DEFAULT_SUFFIX};
pub use writer::AtomicOutput;
