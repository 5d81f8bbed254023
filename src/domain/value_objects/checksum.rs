//! Content Checksum Value Object
//!
//! Raw digest bytes of a source file, used by the incremental-build decision.

use std::fmt;

/// Checksum bytes of some content.
///
/// Comparison is byte-for-byte; the text form is uppercase hex pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentChecksum(Vec<u8>);

/// Hex text could not be decoded into checksum bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex checksum '{0}'")]
pub struct InvalidHexError(pub String);

impl ContentChecksum {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// SHA-256 digest of `content`
    pub fn of(content: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        Self(Sha256::digest(content).to_vec())
    }

    /// Decode hex pairs (either case). Anything but ASCII hex digits is
    /// rejected, including the sign `from_str_radix` would accept.
    pub fn from_hex(hex: &str) -> Result<Self, InvalidHexError> {
        if hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidHexError(hex.to_string()));
        }
        hex.as_bytes()
            .chunks(2)
            .map(|pair| {
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| InvalidHexError(hex.to_string()))
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(Self)
    }

    /// Uppercase hex pairs
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02X}", b)).collect()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContentChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for ContentChecksum {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
