//! Per-line match data models

use crate::anonymization::anonymizer::TransformKind;
use serde::{Deserialize, Serialize};

/// One named field the line pattern is expected to capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Capture group name
    pub name: String,
    /// Transform applied to the captured value
    pub kind: TransformKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: TransformKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A captured field value and its byte span in the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch<'a> {
    /// Capture group name
    pub name: &'a str,
    /// Transform configured for this field
    pub kind: TransformKind,
    /// Matched bytes, exactly as they appear in the line
    pub value: &'a [u8],
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

impl FieldMatch<'_> {
    /// Whether the capture matched an empty substring
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Named captures produced by applying the pattern to one line
///
/// Ephemeral: built per line, consumed by the rewriter, then dropped.
/// Fields appear in capture-group order; groups that did not take part
/// in the match are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult<'a> {
    fields: Vec<FieldMatch<'a>>,
}

impl<'a> MatchResult<'a> {
    pub fn new(fields: Vec<FieldMatch<'a>>) -> Self {
        Self { fields }
    }

    /// Captured fields in capture-group order
    pub fn fields(&self) -> &[FieldMatch<'a>] {
        &self.fields
    }

    /// Look up a captured value by field name
    pub fn get(&self, name: &str) -> Option<&'a [u8]> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_lookup() {
        let result = MatchResult::new(vec![
            FieldMatch {
                name: "login",
                kind: TransformKind::Opaque,
                value: b"alice",
                start: 5,
                end: 10,
            },
            FieldMatch {
                name: "ip",
                kind: TransformKind::Ip,
                value: b"10.0.0.1",
                start: 20,
                end: 28,
            },
        ]);

        assert_eq!(result.len(), 2);
        assert_eq!(result.get("login"), Some(&b"alice"[..]));
        assert_eq!(result.get("ip"), Some(&b"10.0.0.1"[..]));
        assert_eq!(result.get("url"), None);
    }

    #[test]
    fn test_empty_field_match() {
        let field = FieldMatch {
            name: "login",
            kind: TransformKind::Opaque,
            value: b"",
            start: 4,
            end: 4,
        };
        assert!(field.is_empty());
    }
}
