//! Conversions between the `0x`-prefixed hex strings used in broadcast artifacts and native
//! values.
//!
//! Every integer and byte blob in a broadcast artifact is written as a lowercase, `0x`-prefixed
//! hex string. Integers carry no leading zeros (`0x0` for zero) and an empty byte blob is `0x`.

use alloy_primitives::{Bytes, hex};

/// Errors returned when a hex string cannot be converted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("invalid hex bytes {input:?}")]
    Bytes {
        input: String,
        #[source]
        source: hex::FromHexError,
    },
    #[error("invalid hex integer {input:?}")]
    Uint { input: String },
    #[error("hex integer {input:?} does not fit in 64 bits")]
    Overflow { input: String },
}

/// Strips an optional `0x` or `0X` prefix.
fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

/// Encodes `bytes` as a lowercase `0x`-prefixed hex string.
pub fn bytes_to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_prefixed(bytes)
}

/// Decodes a hex string, with or without `0x` prefix, into bytes.
pub fn hex_to_bytes(s: &str) -> Result<Bytes, HexError> {
    let digits = strip_prefix(s);
    let error = |source| HexError::Bytes { input: s.to_string(), source };
    // `hex::decode` would strip a second prefix.
    if let Some((index, c)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(error(hex::FromHexError::InvalidHexCharacter { c, index }));
    }
    hex::decode(digits).map(Bytes::from).map_err(error)
}

/// Encodes `n` as `0x` followed by its minimal lowercase hex digits.
pub fn uint_to_hex(n: u64) -> String {
    format!("{n:#x}")
}

/// Decodes a hex string, with or without `0x` prefix, into a `u64`.
pub fn hex_to_uint(s: &str) -> Result<u64, HexError> {
    let digits = strip_prefix(s);
    // `from_str_radix` tolerates a leading sign, the wire format does not.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::Uint { input: s.to_string() });
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > 16 {
        return Err(HexError::Overflow { input: s.to_string() });
    }
    u64::from_str_radix(digits, 16).map_err(|_| HexError::Uint { input: s.to_string() })
}
