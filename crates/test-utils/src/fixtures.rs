//! Canonical fixture values for registry tests.
//!
//! Centralizes the identities and digests that would otherwise be re-typed
//! across test modules.

use rollbook_types::{Identity, MetadataHash, sha256};

/// The conventional admin identity used across tests.
pub fn admin() -> Identity {
    Identity::new("admin")
}

/// The conventional delegated official used across tests.
pub fn official() -> Identity {
    Identity::new("officer")
}

/// A named registrant identity.
pub fn voter(name: &str) -> Identity {
    Identity::new(format!("voter:{name}"))
}

/// A deterministic metadata digest derived from a label.
pub fn metadata(label: &str) -> MetadataHash {
    sha256(label.as_bytes())
}
