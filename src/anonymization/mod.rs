//! Field extraction and anonymization
//!
//! This module turns one log line into its anonymized form.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Matcher**: one compiled byte pattern extracts named fields from a line
//! - **Transforms**: opaque digest, IP octet remap, host-preserving URL digest
//! - **Registry**: per-transform memoization tables shared by the whole run
//! - **Rewriter**: substitutes transformed values back into the line
//!
//! # Usage
//!
//! ```rust,ignore
//! use loganon::anonymization::{AnonymizationEngine, AnonymizationConfig};
//!
//! let mut engine = AnonymizationEngine::from_config(&AnonymizationConfig::default())?;
//! let outcome = engine.anonymize_line(line);
//! ```

pub mod anonymizer;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod models;
pub mod registry;
pub mod rewriter;

// Re-export main types
pub use anonymizer::TransformKind;
pub use config::{AnonymizationConfig, UnmatchedPolicy};
pub use engine::{AnonymizationEngine, LineOutcome};
pub use matcher::LineMatcher;
pub use models::{FieldMatch, FieldSpec, MatchResult};
pub use registry::TransformRegistry;
pub use rewriter::{LineRewriter, SubstitutionMode};
