//! Line rewriter
//!
//! Substitutes transformed field values back into the original line.
//! Lines are handled as bytes; everything outside a substituted value is
//! copied through unchanged, whatever its encoding.

use crate::anonymization::models::MatchResult;
use crate::anonymization::registry::TransformRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How captured values are substituted back into a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionMode {
    /// Replace every occurrence of each captured value anywhere in the line
    #[default]
    Global,
    /// Replace only the byte spans the capture groups matched
    Anchored,
}

impl SubstitutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Anchored => "anchored",
        }
    }
}

impl fmt::Display for SubstitutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubstitutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "anchored" => Ok(Self::Anchored),
            _ => Err(format!(
                "Invalid substitution mode '{s}'. Must be one of: global, anchored"
            )),
        }
    }
}

/// Rewrites matched lines using registry-backed transforms
#[derive(Debug, Clone, Copy, Default)]
pub struct LineRewriter {
    mode: SubstitutionMode,
}

impl LineRewriter {
    pub fn new(mode: SubstitutionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SubstitutionMode {
        self.mode
    }

    /// Produce the anonymized form of `line`
    ///
    /// Empty captures are left alone in both modes.
    pub fn rewrite(
        &self,
        line: &[u8],
        matched: &MatchResult<'_>,
        registry: &mut TransformRegistry,
    ) -> Vec<u8> {
        match self.mode {
            SubstitutionMode::Global => rewrite_global(line, matched, registry),
            SubstitutionMode::Anchored => rewrite_anchored(line, matched, registry),
        }
    }
}

/// Replace every occurrence of every captured value in one pass
///
/// The scan works on the original line only, so a replacement is never
/// rescanned and cannot feed into another field's substitution. Where
/// values overlap at a position, the longest original wins.
fn rewrite_global(
    line: &[u8],
    matched: &MatchResult<'_>,
    registry: &mut TransformRegistry,
) -> Vec<u8> {
    let mut pairs: Vec<(&[u8], Vec<u8>)> = Vec::with_capacity(matched.len());
    for field in matched.fields().iter().filter(|f| !f.is_empty()) {
        if pairs.iter().any(|(orig, _)| *orig == field.value) {
            continue;
        }
        pairs.push((field.value, registry.transform(field.kind, field.value)));
    }
    if pairs.is_empty() {
        return line.to_vec();
    }
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = Vec::with_capacity(line.len() + 64 * pairs.len());
    let mut pos = 0;
    while pos < line.len() {
        let rest = &line[pos..];
        match pairs.iter().find(|(orig, _)| rest.starts_with(orig)) {
            Some((orig, replacement)) => {
                out.extend_from_slice(replacement);
                pos += orig.len();
            }
            None => {
                out.push(rest[0]);
                pos += 1;
            }
        }
    }
    out
}

/// Replace only the matched spans, left to right
///
/// Nested or overlapping groups keep the span that starts first (the
/// outermost one for nesting); later overlapping spans are skipped.
fn rewrite_anchored(
    line: &[u8],
    matched: &MatchResult<'_>,
    registry: &mut TransformRegistry,
) -> Vec<u8> {
    let mut spans: Vec<_> = matched.fields().iter().filter(|f| !f.is_empty()).collect();
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = Vec::with_capacity(line.len() + 64 * spans.len());
    let mut cursor = 0;
    for field in spans {
        if field.start < cursor {
            tracing::trace!(field = field.name, "Skipping capture nested in an earlier span");
            continue;
        }
        out.extend_from_slice(&line[cursor..field.start]);
        out.extend_from_slice(&registry.transform(field.kind, field.value));
        cursor = field.end;
    }
    out.extend_from_slice(&line[cursor..]);
    out
}
