//! Snapshot persistence for registry state.
//!
//! Hosts with durable storage call [`write_snapshot`] at their own cadence
//! and [`read_snapshot`] on restart; the registry itself never persists
//! implicitly. The format is:
//!
//! ```text
//! magic (4 bytes, "RBSN") | version (u32 LE) | checksum (32 bytes, SHA-256
//! of body) | body (postcard-encoded SnapshotFile)
//! ```
//!
//! Writes go to a sibling temp file and are renamed into place, so a crash
//! mid-write leaves the previous snapshot intact.

use std::{
    fs,
    io::Write,
    path::Path,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use uuid::Uuid;

use rollbook_types::{CodecError, decode, encode, sha256};

use crate::state::RegistryState;

/// Snapshot file magic bytes.
const SNAPSHOT_MAGIC: [u8; 4] = *b"RBSN";

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Byte length of the fixed header (magic + version + checksum).
const HEADER_LEN: usize = 4 + 4 + 32;

/// Snapshot error types.
#[derive(Debug, Snafu)]
pub enum SnapshotError {
    /// IO error during snapshot read or write.
    #[snafu(display("io error on {path}: {source}"))]
    Io {
        /// The file involved.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The file is too short to carry a snapshot header.
    #[snafu(display("truncated snapshot: {len} bytes"))]
    Truncated {
        /// Observed file length.
        len: usize,
    },

    /// The file does not start with the snapshot magic bytes.
    #[snafu(display("invalid snapshot magic"))]
    InvalidMagic,

    /// The snapshot format version is not supported.
    #[snafu(display("unsupported snapshot version: {version}"))]
    UnsupportedVersion {
        /// The unsupported version number.
        version: u32,
    },

    /// The body does not match the header checksum.
    #[snafu(display("snapshot checksum mismatch"))]
    ChecksumMismatch {
        /// Checksum recorded in the header.
        expected: [u8; 32],
        /// Checksum computed from the body.
        actual: [u8; 32],
    },

    /// Error encoding or decoding the snapshot body.
    #[snafu(display("snapshot codec error: {source}"))]
    Codec {
        /// The underlying codec error.
        source: CodecError,
    },
}

/// Metadata stamped into each snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Unique snapshot identifier.
    pub snapshot_id: Uuid,
    /// Wall-clock creation time. Informational only; registry semantics
    /// never depend on it.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    meta: SnapshotMeta,
    state: RegistryState,
}

impl SnapshotMeta {
    fn stamp() -> Self {
        Self { snapshot_id: Uuid::new_v4(), created_at: Utc::now() }
    }
}

/// Encodes a snapshot of `state` to bytes, stamping fresh metadata.
///
/// # Errors
///
/// Returns `SnapshotError::Codec` if the body cannot be encoded.
pub fn encode_snapshot(state: &RegistryState) -> Result<Vec<u8>, SnapshotError> {
    encode_with_meta(state, SnapshotMeta::stamp())
}

fn encode_with_meta(
    state: &RegistryState,
    meta: SnapshotMeta,
) -> Result<Vec<u8>, SnapshotError> {
    let file = SnapshotFile { meta, state: state.clone() };
    let body = encode(&file).context(CodecSnafu)?;
    let checksum = sha256(&body);

    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&SNAPSHOT_MAGIC);
    out.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    out.extend_from_slice(&checksum);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decodes snapshot bytes, verifying magic, version, and checksum.
///
/// # Errors
///
/// Returns the specific corruption kind: `Truncated`, `InvalidMagic`,
/// `UnsupportedVersion`, `ChecksumMismatch`, or `Codec`.
pub fn decode_snapshot(bytes: &[u8]) -> Result<(SnapshotMeta, RegistryState), SnapshotError> {
    if bytes.len() < HEADER_LEN {
        return Err(SnapshotError::Truncated { len: bytes.len() });
    }
    if bytes[..4] != SNAPSHOT_MAGIC {
        return Err(SnapshotError::InvalidMagic);
    }
    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion { version });
    }
    let mut expected = [0u8; 32];
    expected.copy_from_slice(&bytes[8..HEADER_LEN]);

    let body = &bytes[HEADER_LEN..];
    let actual = sha256(body);
    if actual != expected {
        return Err(SnapshotError::ChecksumMismatch { expected, actual });
    }

    let file: SnapshotFile = decode(body).context(CodecSnafu)?;
    Ok((file.meta, file.state))
}

/// Writes a snapshot of `state` to `path`, atomically via a temp file.
///
/// # Errors
///
/// Returns `SnapshotError::Codec` or `SnapshotError::Io`.
pub fn write_snapshot(state: &RegistryState, path: &Path) -> Result<SnapshotMeta, SnapshotError> {
    let meta = SnapshotMeta::stamp();
    let bytes = encode_with_meta(state, meta.clone())?;

    let tmp = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp)
            .context(IoSnafu { path: tmp.display().to_string() })?;
        file.write_all(&bytes).context(IoSnafu { path: tmp.display().to_string() })?;
        file.sync_all().context(IoSnafu { path: tmp.display().to_string() })?;
    }
    fs::rename(&tmp, path).context(IoSnafu { path: path.display().to_string() })?;
    tracing::debug!(path = %path.display(), snapshot_id = %meta.snapshot_id, "snapshot written");
    Ok(meta)
}

/// Reads and verifies a snapshot from `path`.
///
/// # Errors
///
/// Returns `SnapshotError::Io` or a corruption kind from
/// [`decode_snapshot`].
pub fn read_snapshot(path: &Path) -> Result<(SnapshotMeta, RegistryState), SnapshotError> {
    let bytes = fs::read(path).context(IoSnafu { path: path.display().to_string() })?;
    decode_snapshot(&bytes)
}
