//! Host-preserving URL transform

use super::{opaque, FieldTransform};

/// Byte offset where the separator search starts, past `scheme://`
pub const SEPARATOR_SEARCH_OFFSET: usize = 8;

/// Keeps `scheme://host/` verbatim and digests everything after it
///
/// Useful for rough demographics without exposing which pages were
/// visited. Internal hostnames are NOT masked by this transform. Values
/// with no `/` at or after byte 8 fall back to the opaque digest of the
/// whole string.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlTransform;

/// Split `value` into `(prefix, remainder)` around the first `/` found at
/// or after [`SEPARATOR_SEARCH_OFFSET`]; the prefix includes the separator.
pub fn split_host(value: &[u8]) -> Option<(&[u8], &[u8])> {
    let tail = value.get(SEPARATOR_SEARCH_OFFSET..)?;
    let pos = tail.iter().position(|&b| b == b'/')? + SEPARATOR_SEARCH_OFFSET;
    Some(value.split_at(pos + 1))
}

impl FieldTransform for UrlTransform {
    fn transform(&self, value: &[u8]) -> Vec<u8> {
        match split_host(value) {
            Some((prefix, remainder)) => {
                let mut out = Vec::with_capacity(prefix.len() + 64);
                out.extend_from_slice(prefix);
                out.extend_from_slice(opaque::digest(remainder).as_bytes());
                out
            }
            None => opaque::digest(value).into_bytes(),
        }
    }
}
