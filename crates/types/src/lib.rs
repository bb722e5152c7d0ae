//! Core types, errors, and audit events for the rollbook voter registry.
//!
//! This crate provides the foundational types used throughout the registry:
//! - Identifier types (`VoterId`, `Identity`)
//! - Voter records and lifecycle statuses
//! - The 32-byte metadata digest type
//! - Error types using snafu, with a machine-readable code catalog
//! - Audit event definitions and their JSON wire format

#![deny(unsafe_code)]

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod hash;
pub mod types;

// Re-export commonly used types at crate root
pub use codec::{CodecError, decode, encode};
pub use config::{ConfigError, RegistryConfig};
pub use error::{ErrorCode, RegistryError, Result};
pub use events::RegistryEvent;
pub use hash::{MetadataHash, ZERO_METADATA, sha256};
pub use types::{Identity, VoterId, VoterRecord, VoterStatus};
