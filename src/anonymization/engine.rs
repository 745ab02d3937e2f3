//! Line anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that runs a single line
//! through the matcher, the registry-backed transforms and the rewriter.
//!
//! # Examples
//!
//! ```
//! use loganon::anonymization::{AnonymizationEngine, LineOutcome};
//! use loganon::anonymization::matcher::LineMatcher;
//! use loganon::anonymization::registry::TransformRegistry;
//! use loganon::anonymization::rewriter::{LineRewriter, SubstitutionMode};
//! use loganon::anonymization::config::UnmatchedPolicy;
//!
//! # fn example() -> loganon::domain::Result<()> {
//! let mut engine = AnonymizationEngine::new(
//!     LineMatcher::radius_default()?,
//!     LineRewriter::new(SubstitutionMode::Global),
//!     TransformRegistry::new(),
//!     UnmatchedPolicy::Keep,
//! );
//!
//! let line = b"Login OK: [alice] (from client ap01 port 0 cli 10.0.0.1)\n";
//! match engine.anonymize_line(line) {
//!     LineOutcome::Rewritten(out) => assert!(out.ends_with(b"cli 40.0.0.1)\n")),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

use crate::anonymization::config::{AnonymizationConfig, UnmatchedPolicy};
use crate::anonymization::matcher::LineMatcher;
use crate::anonymization::registry::{RegistryStats, TransformRegistry};
use crate::anonymization::rewriter::LineRewriter;
use crate::domain::Result;

/// What happened to one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    /// The line matched and was rewritten
    Rewritten(Vec<u8>),
    /// The line did not match and is written through unchanged
    Unmatched(&'a [u8]),
    /// The line did not match and is omitted from the output
    Dropped,
}

impl LineOutcome<'_> {
    /// Bytes to write, if any
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Rewritten(b) => Some(b.as_slice()),
            Self::Unmatched(b) => Some(b),
            Self::Dropped => None,
        }
    }
}

/// Main anonymization engine
///
/// Owns the transform registry for the run, so every file processed by the
/// same engine shares one set of memoization tables.
#[derive(Debug)]
pub struct AnonymizationEngine {
    matcher: LineMatcher,
    rewriter: LineRewriter,
    registry: TransformRegistry,
    unmatched: UnmatchedPolicy,
}

impl AnonymizationEngine {
    /// Assemble an engine from its parts
    pub fn new(
        matcher: LineMatcher,
        rewriter: LineRewriter,
        registry: TransformRegistry,
        unmatched: UnmatchedPolicy,
    ) -> Self {
        Self {
            matcher,
            rewriter,
            registry,
            unmatched,
        }
    }

    /// Build an engine from configuration with a fresh registry
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile or the field
    /// mapping does not cover exactly the pattern's named groups.
    pub fn from_config(config: &AnonymizationConfig) -> Result<Self> {
        let matcher = config.build_matcher()?;
        tracing::debug!(
            pattern = matcher.pattern(),
            fields = ?matcher.field_specs().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            substitution = %config.substitution,
            "Anonymization engine ready"
        );
        Ok(Self::new(
            matcher,
            LineRewriter::new(config.substitution),
            TransformRegistry::new(),
            config.unmatched,
        ))
    }

    /// Anonymize one line (terminator included, if any)
    ///
    /// The line is raw bytes as read from the file; an unmatched line is
    /// handed back as the same slice.
    pub fn anonymize_line<'a>(&mut self, line: &'a [u8]) -> LineOutcome<'a> {
        match self.matcher.match_line(line) {
            Some(matched) => {
                LineOutcome::Rewritten(self.rewriter.rewrite(line, &matched, &mut self.registry))
            }
            None => match self.unmatched {
                UnmatchedPolicy::Keep => LineOutcome::Unmatched(line),
                UnmatchedPolicy::Drop => LineOutcome::Dropped,
            },
        }
    }

    pub fn matcher(&self) -> &LineMatcher {
        &self.matcher
    }

    pub fn registry(&self) -> &TransformRegistry {
        &self.registry
    }

    /// Transform table counters accumulated so far
    pub fn registry_stats(&self) -> RegistryStats {
        self.registry.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::anonymizer::{opaque, TransformKind};
    use crate::anonymization::rewriter::SubstitutionMode;

    fn engine(policy: UnmatchedPolicy) -> AnonymizationEngine {
        AnonymizationEngine::new(
            LineMatcher::radius_default().unwrap(),
            LineRewriter::new(SubstitutionMode::Global),
            TransformRegistry::new(),
            policy,
        )
    }

    #[test]
    fn test_matched_line_is_rewritten() {
        let mut engine = engine(UnmatchedPolicy::Keep);
        let line = b"Login OK: [alice] (from client ap port 0 cli 10.0.0.1)\n";

        let outcome = engine.anonymize_line(line);
        let expected = format!(
            "Login OK: [{}] (from client ap port 0 cli 40.0.0.1)\n",
            opaque::digest("alice")
        );
        assert_eq!(outcome, LineOutcome::Rewritten(expected.into_bytes()));
    }

    #[test]
    fn test_unmatched_line_passes_through() {
        let mut engine = engine(UnmatchedPolicy::Keep);
        let line: &[u8] = b"Info: Ready to process requests\n";
        assert_eq!(engine.anonymize_line(line), LineOutcome::Unmatched(line));
        assert_eq!(engine.anonymize_line(line).bytes(), Some(line));
    }

    #[test]
    fn test_unmatched_non_utf8_line_is_the_same_bytes() {
        let mut engine = engine(UnmatchedPolicy::Keep);
        let line: &[u8] = b"Info: user J\xf6rg connected\n";
        assert_eq!(engine.anonymize_line(line), LineOutcome::Unmatched(line));
    }

    #[test]
    fn test_unmatched_line_dropped() {
        let mut engine = engine(UnmatchedPolicy::Drop);
        let outcome = engine.anonymize_line(b"Info: Ready to process requests\n");
        assert_eq!(outcome, LineOutcome::Dropped);
        assert_eq!(outcome.bytes(), None);
    }

    #[test]
    fn test_registry_shared_across_lines() {
        let mut engine = engine(UnmatchedPolicy::Keep);
        engine.anonymize_line(b"Login OK: [alice] (from client a port 0 cli 10.0.0.1)\n");
        engine.anonymize_line(b"Login OK: [alice] (from client b port 0 cli 10.0.0.2)\n");

        let stats = engine.registry_stats();
        assert_eq!(stats[&TransformKind::Opaque].entries, 1);
        assert_eq!(stats[&TransformKind::Opaque].hits, 1);
        assert_eq!(stats[&TransformKind::Ip].entries, 2);
    }

    #[test]
    fn test_from_config_rejects_unmapped_group() {
        let mut config = AnonymizationConfig::default();
        config.fields.remove("ip");
        assert!(AnonymizationEngine::from_config(&config).is_err());
    }
}
