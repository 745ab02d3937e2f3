//! Field transform strategies
//!
//! Every captured field is routed through exactly one [`TransformKind`].
//! The set of kinds is closed: configuration names a kind, and the kind
//! resolves to a fixed [`FieldTransform`] implementation.

pub mod ip;
pub mod opaque;
pub mod url;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use ip::IpTransform;
pub use opaque::OpaqueTransform;
pub use url::UrlTransform;

/// Trait for deterministic field transforms
///
/// Values are raw bytes as they appear in the log line; nothing is
/// assumed about their encoding. Implementations must be pure: the same
/// input always yields the same output, within a run and across runs.
pub trait FieldTransform: Send + Sync {
    /// Transform a captured field value
    fn transform(&self, value: &[u8]) -> Vec<u8>;
}

/// The available transform strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// One-way SHA-256 hex digest
    #[serde(alias = "default")]
    Opaque,
    /// Dotted-quad octet remapping, opaque fallback
    Ip,
    /// Host-preserving path digest, opaque fallback
    Url,
}

impl TransformKind {
    /// All kinds, in table order
    pub const ALL: [TransformKind; 3] = [Self::Opaque, Self::Ip, Self::Url];

    /// Stable lowercase name, as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opaque => "opaque",
            Self::Ip => "ip",
            Self::Url => "url",
        }
    }

    /// Resolve the implementation for this kind
    pub fn transformer(&self) -> &'static dyn FieldTransform {
        match self {
            Self::Opaque => &OpaqueTransform,
            Self::Ip => &IpTransform,
            Self::Url => &UrlTransform,
        }
    }

    /// Apply the transform directly, bypassing any memoization
    pub fn apply(&self, value: impl AsRef<[u8]>) -> Vec<u8> {
        self.transformer().transform(value.as_ref())
    }
}

impl Default for TransformKind {
    fn default() -> Self {
        Self::Opaque
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opaque" | "default" => Ok(Self::Opaque),
            "ip" => Ok(Self::Ip),
            "url" => Ok(Self::Url),
            _ => Err(format!(
                "Unknown transform '{s}'. Must be one of: opaque, ip, url"
            )),
        }
    }
}
