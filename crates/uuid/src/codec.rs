//! Conversion between the canonical string form and the 16-byte binary form.
//!
//! Two format checks live here:
//! - [`is_valid`] is lenient: hyphens between groups and surrounding braces are optional and
//!   hex digits may be either case. It is used to accept namespaces and other internal input.
//! - [`is_canonical`] is strict: lowercase only, hyphens mandatory, no braces. It is the
//!   contract for validating externally supplied identifiers.

use crate::{UuidError, UuidResult, UUID_BYTES};

/// Hex digit counts of the five hyphen-separated groups.
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// Byte offsets after which a hyphen is inserted when formatting.
const HYPHEN_AFTER: [usize; 4] = [4, 6, 8, 10];

/// Length of a canonical UUID string.
pub const CANONICAL_LEN: usize = 36;

/// Returns true if `value` looks like a UUID.
///
/// Accepts 32 hex digits grouped 8-4-4-4-12 where each hyphen between groups is optional, the
/// whole value may be wrapped in `{}` (either brace on its own is tolerated too) and digits may
/// be upper or lower case.
///
/// This never fails; malformed input simply returns `false`.
pub fn is_valid(value: &str) -> bool {
    let bytes = value.as_bytes();
    let bytes = bytes.strip_prefix(b"{").unwrap_or(bytes);
    let mut rest = bytes.strip_suffix(b"}").unwrap_or(bytes);

    for (index, &len) in GROUPS.iter().enumerate() {
        if index > 0 {
            rest = rest.strip_prefix(b"-").unwrap_or(rest);
        }
        if rest.len() < len || !rest[..len].iter().all(u8::is_ascii_hexdigit) {
            return false;
        }
        rest = &rest[len..];
    }

    rest.is_empty()
}

/// Returns true if `value` is in canonical form.
///
/// This is a purely syntactic check that validates:
/// - Exactly 36 bytes long
/// - Hyphens at offsets 8, 13, 18 and 23
/// - Lowercase hex characters (`0-9` and `a-f`) everywhere else
pub fn is_canonical(value: &str) -> bool {
    value.len() == CANONICAL_LEN
        && value.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
        })
}

/// Decodes a UUID string into its 16 raw bytes.
///
/// Every `-`, `{` and `}` is removed first; hyphen placement is not checked. The remainder must
/// be exactly 32 hex digits of either case.
///
/// # Errors
///
/// Returns [`UuidError::Format`] if the stripped input is not exactly 32 hex characters.
pub fn to_binary(uuid: &str) -> UuidResult<[u8; UUID_BYTES]> {
    let digits: Vec<u8> = uuid
        .bytes()
        .filter(|b| !matches!(b, b'-' | b'{' | b'}'))
        .collect();

    if digits.len() != UUID_BYTES * 2 {
        return Err(UuidError::Format(format!(
            "expected 32 hex digits, got {} in '{}'",
            digits.len(),
            uuid
        )));
    }

    let mut bytes = [0u8; UUID_BYTES];
    hex::decode_to_slice(&digits, &mut bytes)
        .map_err(|e| UuidError::Format(format!("'{}' is not hexadecimal: {}", uuid, e)))?;
    Ok(bytes)
}

/// Formats 16 raw bytes as a canonical UUID string.
///
/// This is the single formatting path used by every generator in this crate.
///
/// # Errors
///
/// Returns [`UuidError::Format`] if `bytes` is not exactly 16 bytes long.
pub fn from_binary(bytes: &[u8]) -> UuidResult<String> {
    if bytes.len() != UUID_BYTES {
        return Err(UuidError::Format(format!(
            "binary UUID must be 16 bytes, got {}",
            bytes.len()
        )));
    }

    let mut out = String::with_capacity(CANONICAL_LEN);
    let mut start = 0;
    for end in HYPHEN_AFTER {
        out.push_str(&hex::encode(&bytes[start..end]));
        out.push('-');
        start = end;
    }
    out.push_str(&hex::encode(&bytes[start..]));
    Ok(out)
}
