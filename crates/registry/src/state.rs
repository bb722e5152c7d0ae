//! The registry's owned state and its structural invariants.
//!
//! One [`RegistryState`] exists per registry instance, lives for the service
//! lifetime, and is the unit of snapshot persistence. All fields are plain
//! data; behavior lives in the access/record/registry modules.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use snafu::Snafu;

use rollbook_types::{Identity, VoterId, VoterRecord};

use crate::allocator::IdAllocator;

/// Complete registry state: administration, pause flag, id allocation, and
/// the per-identity records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    /// The sole administrator. Mutated only by admin transfer; never empty.
    pub admin: Identity,
    /// Global halt flag. While set, every mutating operation except
    /// admin-only ones fails.
    pub paused: bool,
    /// Id counter and reverse index.
    pub allocator: IdAllocator,
    /// Identities with delegated approve/revoke authority.
    pub officials: BTreeSet<Identity>,
    /// One record per registered identity; records are never deleted.
    pub records: BTreeMap<Identity, VoterRecord>,
}

impl RegistryState {
    /// Creates an unpaused registry administered by `admin`, with no
    /// officials and no records.
    pub fn new(admin: Identity) -> Self {
        Self {
            admin,
            paused: false,
            allocator: IdAllocator::new(),
            officials: BTreeSet::new(),
            records: BTreeMap::new(),
        }
    }

    /// Looks up a record by registrant identity.
    pub fn record(&self, voter: &Identity) -> Option<&VoterRecord> {
        self.records.get(voter)
    }

    /// Verifies the structural invariants of the state.
    ///
    /// Cheap enough to run after every test scenario; hosts may also run it
    /// after restoring a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (id, identity) in self.allocator.assignments() {
            let record = self.records.get(identity).ok_or_else(|| {
                InvariantViolation::DanglingIndexEntry { id, identity: identity.clone() }
            })?;
            if record.id != id {
                return Err(InvariantViolation::IndexIdMismatch {
                    id,
                    record_id: record.id,
                    identity: identity.clone(),
                });
            }
        }

        for (identity, record) in &self.records {
            if record.id >= self.allocator.next_id() {
                return Err(InvariantViolation::CounterNotAhead {
                    id: record.id,
                    next_id: self.allocator.next_id(),
                });
            }
            if record.eligibility != record.is_eligible() {
                return Err(InvariantViolation::StaleEligibility {
                    identity: identity.clone(),
                });
            }
        }

        if self.admin.is_empty() {
            return Err(InvariantViolation::EmptyAdmin);
        }

        Ok(())
    }
}

/// A violated structural invariant, reported by
/// [`RegistryState::check_invariants`].
#[derive(Debug, Snafu)]
pub enum InvariantViolation {
    /// An index entry points at an identity with no record.
    #[snafu(display("index entry {id} points at {identity}, which has no record"))]
    DanglingIndexEntry {
        /// The orphaned index key.
        id: VoterId,
        /// The identity the index names.
        identity: Identity,
    },

    /// An index entry and its record disagree on the id.
    #[snafu(display("index entry {id} resolves to {identity} whose record carries {record_id}"))]
    IndexIdMismatch {
        /// The index key.
        id: VoterId,
        /// The id stored in the record.
        record_id: VoterId,
        /// The identity both refer to.
        identity: Identity,
    },

    /// An assigned id is not strictly below the counter.
    #[snafu(display("assigned id {id} is not below the counter {next_id}"))]
    CounterNotAhead {
        /// The out-of-range assigned id.
        id: VoterId,
        /// The counter value.
        next_id: VoterId,
    },

    /// A record's cached eligibility flag disagrees with its status.
    #[snafu(display("cached eligibility for {identity} disagrees with status"))]
    StaleEligibility {
        /// The affected identity.
        identity: Identity,
    },

    /// The admin identity is empty.
    #[snafu(display("admin identity is empty"))]
    EmptyAdmin,
}
