//! Proptest strategies for rollbook domain types.
//!
//! Reusable generators for property-based testing across crates. Strategies
//! produce well-formed domain values while exploring edge cases through
//! random variation.
//!
//! # Usage
//!
//! ```no_run
//! use rollbook_test_utils::strategies;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(identity in strategies::arb_identity()) {
//!         // test invariant with a randomly generated identity
//!     }
//! }
//! ```

use proptest::prelude::*;

use rollbook_types::{Identity, MetadataHash, VoterStatus};

/// Generates an arbitrary principal string of 1-24 characters matching
/// `[a-z][a-z0-9:_-]{0,23}`.
pub fn arb_identity() -> impl Strategy<Value = Identity> {
    "[a-z][a-z0-9:_-]{0,23}".prop_map(Identity::new)
}

/// Generates a vector of distinct identities, 1-32 entries.
pub fn arb_identity_set() -> impl Strategy<Value = Vec<Identity>> {
    proptest::collection::btree_set(arb_identity(), 1..32)
        .prop_map(|set| set.into_iter().collect())
}

/// Generates an arbitrary 32-byte metadata digest.
pub fn arb_metadata_hash() -> impl Strategy<Value = MetadataHash> {
    any::<[u8; 32]>()
}

/// Generates an arbitrary lifecycle status.
pub fn arb_status() -> impl Strategy<Value = VoterStatus> {
    prop_oneof![
        Just(VoterStatus::Pending),
        Just(VoterStatus::Approved),
        Just(VoterStatus::Revoked),
    ]
}

/// Generates an arbitrary height counter value.
pub fn arb_height() -> impl Strategy<Value = u64> {
    0..=u64::from(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_identities_are_never_empty(identity in arb_identity()) {
            prop_assert!(!identity.is_empty());
        }

        #[test]
        fn generated_identity_sets_are_distinct(identities in arb_identity_set()) {
            let mut deduped = identities.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), identities.len());
        }
    }
}
