//! Digest types and hashing helpers for the voter registry.
//!
//! The registry treats metadata digests as opaque 32-byte values and never
//! verifies a preimage. SHA-256 is used internally for snapshot integrity
//! checksums.

use sha2::{Digest, Sha256};
use snafu::Snafu;

/// Opaque 32-byte metadata digest attached to each voter record.
///
/// The registry stores and returns this value verbatim; interpretation and
/// preimage verification belong to collaborating subsystems.
pub type MetadataHash = [u8; 32];

/// All-zero digest. Legal as a metadata value, since registration imposes no
/// structure on the digest bytes.
pub const ZERO_METADATA: MetadataHash = [0u8; 32];

/// Compute SHA-256 of arbitrary data.
///
/// Used for snapshot body checksums, not for metadata digests.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Error parsing a hex-encoded digest.
#[derive(Debug, Snafu)]
pub enum HashParseError {
    /// Input was not 64 hex characters.
    #[snafu(display("expected 64 hex characters, got {len}"))]
    BadLength {
        /// Length of the rejected input.
        len: usize,
    },

    /// Input contained a non-hex character.
    #[snafu(display("invalid hex: {source}"))]
    BadHex {
        /// The underlying hex decode error.
        source: hex::FromHexError,
    },
}

/// Renders a digest as lowercase hex (64 characters).
pub fn to_hex(hash: &MetadataHash) -> String {
    hex::encode(hash)
}

/// Parses a 64-character hex string into a digest.
pub fn parse_hex(s: &str) -> Result<MetadataHash, HashParseError> {
    if s.len() != 64 {
        return Err(HashParseError::BadLength { len: s.len() });
    }
    let bytes = hex::decode(s).map_err(|source| HashParseError::BadHex { source })?;
    let mut out = ZERO_METADATA;
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty_input() {
        // SHA-256(""), the canonical empty-input digest.
        assert_eq!(
            to_hex(&sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let digest = sha256(b"voter metadata");
        let encoded = to_hex(&digest);
        assert_eq!(encoded.len(), 64);
        assert_eq!(parse_hex(&encoded).expect("parse"), digest);
    }

    #[test]
    fn test_parse_hex_rejects_short_input() {
        let err = parse_hex("abcd").unwrap_err();
        assert!(matches!(err, HashParseError::BadLength { len: 4 }));
    }

    #[test]
    fn test_parse_hex_rejects_non_hex() {
        let bad = "zz".repeat(32);
        assert!(matches!(parse_hex(&bad), Err(HashParseError::BadHex { .. })));
    }

    #[test]
    fn test_zero_metadata_is_all_zero() {
        assert_eq!(ZERO_METADATA, [0u8; 32]);
        assert_eq!(to_hex(&ZERO_METADATA), "0".repeat(64));
    }
}
