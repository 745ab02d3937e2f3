//! Dotted-quad IP remapping transform

use super::{opaque, FieldTransform};

/// Maps each octet `v` of a dotted quad to `(v^5) mod 255`
///
/// Keeps the dotted-quad shape so downstream tooling still sees an
/// address, but the mapping is collision prone and non-uniform: distinct
/// octets can collide and 255 is never produced. Inputs that are not a
/// dotted quad fall back to the opaque digest of the whole string.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpTransform;

/// Parse `a.b.c.d` where every part is 1+ ASCII digits in 0..=255
pub fn parse_dotted_quad(value: &[u8]) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = value.split(|&b| b == b'.');

    for octet in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || !part.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let parsed = part
            .iter()
            .try_fold(0u32, |acc, b| {
                let acc = acc * 10 + u32::from(b - b'0');
                (acc <= 255).then_some(acc)
            })?;
        *octet = parsed as u8;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(octets)
}

/// `(v^5) mod 255`, always in 0..=254
pub fn remap_octet(v: u8) -> u8 {
    let v = u64::from(v);
    (v.pow(5) % 255) as u8
}

impl FieldTransform for IpTransform {
    fn transform(&self, value: &[u8]) -> Vec<u8> {
        match parse_dotted_quad(value) {
            Some([a, b, c, d]) => format!(
                "{}.{}.{}.{}",
                remap_octet(a),
                remap_octet(b),
                remap_octet(c),
                remap_octet(d)
            )
            .into_bytes(),
            None => opaque::digest(value).into_bytes(),
        }
    }
}
