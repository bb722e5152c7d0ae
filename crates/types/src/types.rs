//! Core type definitions for the rollbook voter registry.
//!
//! Covers identifier types, the participant identity wrapper, and the
//! per-voter record that the lifecycle state machine owns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::MetadataHash;

// ============================================================================
// Identifier Types
// ============================================================================

/// Generates a newtype wrapper around a numeric type for type-safe identifiers.
///
/// Each generated type provides:
/// - Standard derives: Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord
/// - Serde with `#[serde(transparent)]` for wire format compatibility
/// - `From<inner>` and `Into<inner>` conversions
/// - `Display` with a semantic prefix (e.g., `voter:7`)
/// - `new()` constructor and `value()` accessor
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $inner:ty, $prefix:expr
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Creates a new identifier from a raw value.
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Returns the raw numeric value.
            #[inline]
            pub const fn value(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", $prefix, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = <$inner as std::str::FromStr>::Err;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                s.parse::<$inner>().map(Self)
            }
        }
    };
}

define_id!(
    /// Registration identifier assigned once per voter at registration time.
    ///
    /// Wraps a `u64` with compile-time type safety to prevent mixing with
    /// heights or other counters. Identifiers are allocated sequentially
    /// starting at 1 and are never reused, so gaps (from administrative
    /// counter resets) are legal.
    ///
    /// # Display
    ///
    /// Formats with `voter:` prefix: `voter:7`.
    VoterId, u64, "voter"
);

/// An authenticated participant identity, as supplied by the host environment.
///
/// Identities are opaque principal strings; the registry never inspects
/// their structure beyond an emptiness check on administrative targets.
/// Ordered so it can key the registry's `BTreeMap`s deterministically.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from a raw principal string.
    pub fn new(principal: impl Into<String>) -> Self {
        Self(principal.into())
    }

    /// Returns the principal as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the identity is the empty principal.
    ///
    /// Empty identities are rejected as admin/official targets; the host
    /// environment authenticates callers, so an empty *caller* never occurs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(principal: &str) -> Self {
        Self(principal.to_owned())
    }
}

impl From<String> for Identity {
    fn from(principal: String) -> Self {
        Self(principal)
    }
}

// ============================================================================
// Lifecycle Status
// ============================================================================

/// Lifecycle status of a voter record.
///
/// Transitions are forward-only: `Pending → Approved`,
/// `Pending | Approved → Revoked`. Nothing re-enters `Pending` and nothing
/// leaves `Revoked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoterStatus {
    /// Registered, awaiting review. The only status entered at creation.
    Pending,
    /// Approved by the admin or an official; the voter is eligible.
    Approved,
    /// Terminal state. Revoked records are preserved for audit history,
    /// never deleted.
    Revoked,
}

impl VoterStatus {
    /// Returns a snake_case string for logging and metrics labels.
    pub const fn as_str(&self) -> &'static str {
        match self {
            VoterStatus::Pending => "pending",
            VoterStatus::Approved => "approved",
            VoterStatus::Revoked => "revoked",
        }
    }

    /// True iff the status is terminal.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, VoterStatus::Revoked)
    }
}

impl fmt::Display for VoterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Voter Record
// ============================================================================

/// A participant's registry record.
///
/// Created exactly once per identity at registration and never deleted;
/// "removal" is the `Revoked` terminal status. Only `status`, the derived
/// `eligibility` flag, and `metadata_hash` ever change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    /// Registration identifier, assigned once, immutable.
    pub id: VoterId,
    /// Cached convenience flag, kept equal to `status == Approved` after
    /// every completed mutation. Readers recompute eligibility from
    /// `status` rather than trusting this field.
    pub eligibility: bool,
    /// Height counter value observed at registration time, immutable.
    pub registration_height: u64,
    /// Current lifecycle status.
    pub status: VoterStatus,
    /// Opaque 32-byte digest of off-registry identity metadata. The only
    /// mutable field besides `status`/`eligibility`.
    pub metadata_hash: MetadataHash,
}

impl VoterRecord {
    /// Creates a fresh `Pending` record at the given height.
    pub fn new_pending(id: VoterId, registration_height: u64, metadata_hash: MetadataHash) -> Self {
        Self {
            id,
            eligibility: false,
            registration_height,
            status: VoterStatus::Pending,
            metadata_hash,
        }
    }

    /// Eligibility derived from status, not the cached flag.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.status == VoterStatus::Approved
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::hash::ZERO_METADATA;

    #[test]
    fn test_voter_id_new_and_value() {
        let id = VoterId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_voter_id_display() {
        assert_eq!(format!("{}", VoterId::new(123)), "voter:123");
    }

    #[test]
    fn test_voter_id_from_u64() {
        let id: VoterId = 7_u64.into();
        assert_eq!(id.value(), 7);
    }

    #[test]
    fn test_voter_id_into_u64() {
        let raw: u64 = VoterId::new(9).into();
        assert_eq!(raw, 9);
    }

    #[test]
    fn test_voter_id_ordering() {
        assert!(VoterId::new(1) < VoterId::new(2));
    }

    #[test]
    fn test_voter_id_serde_transparent() {
        let id = VoterId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: VoterId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_voter_id_parse() {
        let id: VoterId = "17".parse().expect("parse voter id");
        assert_eq!(id, VoterId::new(17));
    }

    #[test]
    fn test_identity_roundtrip_and_display() {
        let alice = Identity::new("user:alice");
        assert_eq!(alice.as_str(), "user:alice");
        assert_eq!(format!("{alice}"), "user:alice");
        let json = serde_json::to_string(&alice).unwrap();
        assert_eq!(json, "\"user:alice\"");
    }

    #[test]
    fn test_identity_is_empty() {
        assert!(Identity::new("").is_empty());
        assert!(!Identity::new("x").is_empty());
    }

    #[test]
    fn test_identity_btree_key_ordering() {
        use std::collections::BTreeMap;
        let mut map = BTreeMap::new();
        map.insert(Identity::new("b"), 2);
        map.insert(Identity::new("a"), 1);
        let keys: Vec<_> = map.keys().map(Identity::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(VoterStatus::Pending.as_str(), "pending");
        assert_eq!(VoterStatus::Approved.as_str(), "approved");
        assert_eq!(VoterStatus::Revoked.as_str(), "revoked");
    }

    #[test]
    fn test_status_terminal() {
        assert!(!VoterStatus::Pending.is_terminal());
        assert!(!VoterStatus::Approved.is_terminal());
        assert!(VoterStatus::Revoked.is_terminal());
    }

    #[test]
    fn test_new_pending_record_shape() {
        let rec = VoterRecord::new_pending(VoterId::new(1), 50, ZERO_METADATA);
        assert_eq!(rec.id, VoterId::new(1));
        assert_eq!(rec.status, VoterStatus::Pending);
        assert!(!rec.eligibility);
        assert!(!rec.is_eligible());
        assert_eq!(rec.registration_height, 50);
        assert_eq!(rec.metadata_hash, ZERO_METADATA);
    }

    #[test]
    fn test_eligibility_derived_from_status() {
        let mut rec = VoterRecord::new_pending(VoterId::new(1), 0, ZERO_METADATA);
        rec.status = VoterStatus::Approved;
        // Cached flag deliberately left stale: the derived query must not trust it.
        assert!(rec.is_eligible());
        assert!(!rec.eligibility);
    }
}
