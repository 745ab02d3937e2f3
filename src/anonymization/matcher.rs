//! Line matcher
//!
//! Applies one compiled pattern to each line and extracts its named
//! capture groups. The pattern is used exactly as configured: `regex`
//! searches leftmost-first with greedy quantifiers, so a leading `.*`
//! over-matches up to the last anchor on the line, same as the reference
//! RADIUS pattern expects.
//!
//! Lines are matched as raw bytes with Unicode mode off: `.` and negated
//! classes match any byte but `\n`, and `\w`/`\d`/`\s` are ASCII classes.
//! Log files mixing encodings (Latin-1 names in a UTF-8 log) therefore
//! match the same way as pure ASCII lines. Patterns can opt back in to
//! Unicode classes locally with `(?u:...)`.

use crate::anonymization::anonymizer::TransformKind;
use crate::anonymization::models::{FieldMatch, FieldSpec, MatchResult};
use crate::domain::{LoganonError, Result};
use regex::bytes::{Regex, RegexBuilder};
use std::collections::BTreeMap;

/// Default pattern: usernames and client IPs from RADIUS server logs
pub const DEFAULT_PATTERN: &str = r".*\[(?P<login>.*)\].* cli (?P<ip>[0-9.]+).*";

/// Field mapping for [`DEFAULT_PATTERN`]
pub fn default_fields() -> BTreeMap<String, TransformKind> {
    BTreeMap::from([
        ("login".to_string(), TransformKind::Opaque),
        ("ip".to_string(), TransformKind::Ip),
    ])
}

/// Compiled line pattern with a validated field mapping
#[derive(Debug, Clone)]
pub struct LineMatcher {
    regex: Regex,
    /// Indexed by capture group slot; `None` for unnamed groups
    slots: Vec<Option<FieldSpec>>,
}

impl LineMatcher {
    /// Compile `pattern` and bind each named group to its transform
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the pattern does not compile
    /// - the pattern has no named capture groups
    /// - a named group has no entry in `fields`
    /// - an entry in `fields` names no group in the pattern
    pub fn new(pattern: &str, fields: &BTreeMap<String, TransformKind>) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .unicode(false)
            .build()
            .map_err(|e| LoganonError::Pattern(format!("Invalid line pattern: {e}")))?;

        let group_names: Vec<&str> = regex.capture_names().flatten().collect();
        if group_names.is_empty() {
            return Err(LoganonError::Configuration(
                "Line pattern has no named capture groups; nothing would be anonymized"
                    .to_string(),
            ));
        }

        let unmapped: Vec<&str> = group_names
            .iter()
            .copied()
            .filter(|name| !fields.contains_key(*name))
            .collect();
        if !unmapped.is_empty() {
            return Err(LoganonError::Configuration(format!(
                "No transform configured for capture group(s): {}",
                unmapped.join(", ")
            )));
        }

        let unused: Vec<&str> = fields
            .keys()
            .map(String::as_str)
            .filter(|name| !group_names.contains(name))
            .collect();
        if !unused.is_empty() {
            return Err(LoganonError::Configuration(format!(
                "Transform configured for field(s) not captured by the pattern: {}",
                unused.join(", ")
            )));
        }

        let slots = regex
            .capture_names()
            .map(|name| name.map(|n| FieldSpec::new(n, fields[n])))
            .collect();

        Ok(Self { regex, slots })
    }

    /// Matcher for the built-in RADIUS pattern
    pub fn radius_default() -> Result<Self> {
        Self::new(DEFAULT_PATTERN, &default_fields())
    }

    /// Named fields in capture-group order
    pub fn field_specs(&self) -> impl Iterator<Item = &FieldSpec> {
        self.slots.iter().flatten()
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Apply the pattern to `line`
    ///
    /// Returns `None` when the line does not match; the caller passes the
    /// line through (or drops it) and this is not an error.
    pub fn match_line<'a>(&'a self, line: &'a [u8]) -> Option<MatchResult<'a>> {
        let captures = self.regex.captures(line)?;

        let fields = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                let spec = slot.as_ref()?;
                let m = captures.get(idx)?;
                Some(FieldMatch {
                    name: spec.name.as_str(),
                    kind: spec.kind,
                    value: m.as_bytes(),
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect();

        Some(MatchResult::new(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS_LINE: &str =
        "Tue Mar 4 10:00:01 2025 : Auth: Login OK: [alice] (from client ap01 port 0 cli 10.0.0.1)\n";

    #[test]
    fn test_default_pattern_extracts_fields() {
        let matcher = LineMatcher::radius_default().unwrap();
        let result = matcher.match_line(RADIUS_LINE.as_bytes()).unwrap();

        assert_eq!(result.get("login"), Some(&b"alice"[..]));
        assert_eq!(result.get("ip"), Some(&b"10.0.0.1"[..]));

        let login = &result.fields()[0];
        assert_eq!(login.kind, TransformKind::Opaque);
        assert_eq!(&RADIUS_LINE[login.start..login.end], "alice");
    }

    #[test]
    fn test_no_match_is_none() {
        let matcher = LineMatcher::radius_default().unwrap();
        assert!(matcher
            .match_line(b"Tue Mar 4 10:00:00 2025 : Info: Ready to process requests\n")
            .is_none());
    }

    #[test]
    fn test_greedy_quantifiers_are_preserved() {
        let matcher = LineMatcher::radius_default().unwrap();

        // a trailing bracket pair with no " cli " after it cannot anchor
        let line = "Login incorrect: [bob] (from client x port 1 cli 10.1.1.1) [extra]";
        let result = matcher.match_line(line.as_bytes()).unwrap();
        assert_eq!(result.get("login"), Some(&b"bob"[..]));

        // the leading `.*` settles on the last usable "["
        let line = "Login incorrect: [bob] [tls] (from client x port 1 cli 10.1.1.1)";
        let result = matcher.match_line(line.as_bytes()).unwrap();
        assert_eq!(result.get("login"), Some(&b"tls"[..]));

        // the login capture runs on to the last "]" before " cli "
        let line = "Login OK: [bob] x] cli 10.1.1.1";
        let result = matcher.match_line(line.as_bytes()).unwrap();
        assert_eq!(result.get("login"), Some(&b"bob] x"[..]));
    }

    #[test]
    fn test_unmapped_group_is_configuration_error() {
        let fields = BTreeMap::from([("login".to_string(), TransformKind::Opaque)]);
        let err = LineMatcher::new(DEFAULT_PATTERN, &fields).unwrap_err();
        assert!(matches!(err, LoganonError::Configuration(_)));
        assert!(err.to_string().contains("ip"));
    }

    #[test]
    fn test_unused_mapping_is_configuration_error() {
        let mut fields = default_fields();
        fields.insert("url".to_string(), TransformKind::Url);
        let err = LineMatcher::new(DEFAULT_PATTERN, &fields).unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn test_pattern_without_named_groups_is_rejected() {
        let err = LineMatcher::new(r"cli ([0-9.]+)", &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, LoganonError::Configuration(_)));
    }

    #[test]
    fn test_invalid_pattern_is_pattern_error() {
        let err = LineMatcher::new(r"(?P<login>[", &default_fields()).unwrap_err();
        assert!(matches!(err, LoganonError::Pattern(_)));
    }

    #[test]
    fn test_optional_group_absent_from_result() {
        let fields = BTreeMap::from([
            ("user".to_string(), TransformKind::Opaque),
            ("url".to_string(), TransformKind::Url),
        ]);
        let matcher =
            LineMatcher::new(r"user=(?P<user>\S+)(?: url=(?P<url>\S+))?", &fields).unwrap();

        let result = matcher.match_line(b"user=carol").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("url"), None);
    }

    #[test]
    fn test_non_utf8_bytes_match_like_ascii() {
        let matcher = LineMatcher::radius_default().unwrap();
        let line = b"Login OK: [J\xf6rg] (from client ap01 port 0 cli 10.0.0.1)\n";
        let result = matcher.match_line(line).unwrap();

        assert_eq!(result.get("login"), Some(&b"J\xf6rg"[..]));
        assert_eq!(result.get("ip"), Some(&b"10.0.0.1"[..]));
    }

    #[test]
    fn test_non_ascii_literal_in_pattern() {
        let fields = BTreeMap::from([("user".to_string(), TransformKind::Opaque)]);
        let matcher = LineMatcher::new(r"utilisateur=(?P<user>\S+) connecté", &fields).unwrap();

        let result = matcher.match_line("utilisateur=zoë connecté".as_bytes()).unwrap();
        assert_eq!(result.get("user"), Some("zoë".as_bytes()));
    }
}
