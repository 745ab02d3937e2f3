//! Anonymization configuration (the `[pattern]` section)

use crate::anonymization::anonymizer::TransformKind;
use crate::anonymization::matcher::{default_fields, LineMatcher, DEFAULT_PATTERN};
use crate::anonymization::rewriter::SubstitutionMode;
use crate::domain::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// What to do with lines the pattern does not match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Write the line through unchanged
    #[default]
    Keep,
    /// Leave the line out of the output
    Drop,
}

impl fmt::Display for UnmatchedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => f.write_str("keep"),
            Self::Drop => f.write_str("drop"),
        }
    }
}

impl FromStr for UnmatchedPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "drop" => Ok(Self::Drop),
            _ => Err(format!("Invalid unmatched policy '{s}'. Must be one of: keep, drop")),
        }
    }
}

/// Line pattern and field-to-transform mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Regex with one named capture group per field to anonymize
    #[serde(default = "default_regex")]
    pub regex: String,

    /// Substitution mode for matched values
    #[serde(default)]
    pub substitution: SubstitutionMode,

    /// Handling of lines the pattern does not match
    #[serde(default)]
    pub unmatched: UnmatchedPolicy,

    /// Capture group name -> transform
    ///
    /// Left empty when the table is absent; [`apply_default_fields`]
    /// supplies the RADIUS mapping for the built-in pattern only.
    ///
    /// [`apply_default_fields`]: AnonymizationConfig::apply_default_fields
    #[serde(default)]
    pub fields: BTreeMap<String, TransformKind>,
}

fn default_regex() -> String {
    DEFAULT_PATTERN.to_string()
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            regex: default_regex(),
            substitution: SubstitutionMode::default(),
            unmatched: UnmatchedPolicy::default(),
            fields: default_fields(),
        }
    }
}

impl AnonymizationConfig {
    /// Compile the pattern and bind the field mapping
    pub fn build_matcher(&self) -> Result<LineMatcher> {
        LineMatcher::new(&self.regex, &self.fields)
    }

    /// Fill in the RADIUS field mapping when the built-in pattern is used
    /// without a `[pattern.fields]` table
    pub fn apply_default_fields(&mut self) {
        if self.fields.is_empty() && self.regex == DEFAULT_PATTERN {
            self.fields = default_fields();
        }
    }

    /// Validate the configuration by building the matcher once
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.regex.trim().is_empty() {
            return Err("pattern.regex cannot be empty".to_string());
        }
        if self.fields.is_empty() {
            return Err(
                "pattern.fields is required with a custom pattern.regex: map each named \
                 capture group to opaque, ip or url"
                    .to_string(),
            );
        }
        self.build_matcher().map(|_| ()).map_err(|e| e.to_string())
    }

    /// Apply `LOGANON_PATTERN_*` environment overrides
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(val) = std::env::var("LOGANON_PATTERN_REGEX") {
            self.regex = val;
        }

        if let Ok(val) = std::env::var("LOGANON_PATTERN_SUBSTITUTION") {
            self.substitution = val
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid LOGANON_PATTERN_SUBSTITUTION value")?;
        }

        if let Ok(val) = std::env::var("LOGANON_PATTERN_UNMATCHED") {
            self.unmatched = val
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid LOGANON_PATTERN_UNMATCHED value")?;
        }

        Ok(())
    }
}
