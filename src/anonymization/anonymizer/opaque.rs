//! Opaque digest transform

use super::FieldTransform;
use sha2::{Digest, Sha256};

/// Replaces a value with the hex-encoded SHA-256 digest of its bytes
///
/// Not reversible, but repeatable: there is no salt or seed, so the same
/// value maps to the same digest in every run.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueTransform;

/// Hex-encoded SHA-256 digest of `value` (64 lowercase characters)
pub fn digest(value: impl AsRef<[u8]>) -> String {
    let result = Sha256::digest(value.as_ref());
    format!("{result:x}")
}

impl FieldTransform for OpaqueTransform {
    fn transform(&self, value: &[u8]) -> Vec<u8> {
        digest(value).into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // sha256("abc")
        assert_eq!(
            digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_shape() {
        let out = OpaqueTransform.transform(b"alice");
        assert_eq!(out.len(), 64);
        assert!(out.iter().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_deterministic_and_distinct() {
        assert_eq!(digest("alice"), digest("alice"));
        assert_ne!(digest("alice"), digest("bob"));
        assert_ne!(digest("alice"), digest("alice "));
    }

    #[test]
    fn test_digest_covers_raw_bytes() {
        // Latin-1 "Jörg" and its UTF-8 spelling are different values
        assert_ne!(digest(b"J\xf6rg"), digest("Jörg"));
        assert_eq!(digest(b"J\xf6rg").len(), 64);
    }
}
