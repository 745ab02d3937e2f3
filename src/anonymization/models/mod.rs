//! Data models shared by the matcher, rewriter and engine

pub mod field_match;

pub use field_match::{FieldMatch, FieldSpec, MatchResult};
