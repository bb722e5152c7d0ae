//! Sequential registration-id allocation.
//!
//! Ids are assigned by a plain get-and-increment counter starting at 1, so
//! they are strictly increasing and deterministic for any call sequence.
//! The reverse index maps each assigned id back to the identity that
//! registered it; entries are written exactly once and never updated, even
//! after the identity is later revoked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rollbook_types::{Identity, RegistryError, Result, VoterId};

/// Issues unique, monotonically increasing registration identifiers and
/// maintains the id → identity reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    /// The next id to hand out. Strictly greater than every assigned id;
    /// moves forward only.
    next_id: VoterId,
    /// Reverse index, populated at registration time only.
    id_index: BTreeMap<VoterId, Identity>,
}

impl IdAllocator {
    /// Creates an allocator with the counter at 1.
    pub fn new() -> Self {
        Self { next_id: VoterId::new(1), id_index: BTreeMap::new() }
    }

    /// Returns the id the next registration will receive.
    #[inline]
    pub fn next_id(&self) -> VoterId {
        self.next_id
    }

    /// Assigns the next id to `identity` and advances the counter.
    ///
    /// Only called from inside `register`; allocation is not part of the
    /// public call surface.
    pub fn allocate(&mut self, identity: Identity) -> VoterId {
        let id = self.next_id;
        self.next_id = VoterId::new(id.value() + 1);
        self.id_index.insert(id, identity);
        id
    }

    /// Moves the counter forward to `new_id`.
    ///
    /// An emergency escape hatch for recovering from operational anomalies.
    /// Accepts only strictly larger values; existing index entries and
    /// records are untouched, so id gaps are a legal outcome.
    ///
    /// # Errors
    ///
    /// Returns `InvalidId` if `new_id` is not strictly greater than the
    /// current counter.
    pub fn reset(&mut self, new_id: VoterId) -> Result<()> {
        if new_id <= self.next_id {
            return Err(RegistryError::InvalidId { current: self.next_id, requested: new_id });
        }
        self.next_id = new_id;
        Ok(())
    }

    /// Looks up the identity that registered under `id`.
    pub fn lookup(&self, id: VoterId) -> Option<&Identity> {
        self.id_index.get(&id)
    }

    /// Iterates over all assigned `(id, identity)` pairs in id order.
    pub fn assignments(&self) -> impl Iterator<Item = (VoterId, &Identity)> {
        self.id_index.iter().map(|(id, identity)| (*id, identity))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_one() {
        assert_eq!(IdAllocator::new().next_id(), VoterId::new(1));
    }

    #[test]
    fn test_allocation_is_sequential() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.allocate(Identity::new("a")), VoterId::new(1));
        assert_eq!(alloc.allocate(Identity::new("b")), VoterId::new(2));
        assert_eq!(alloc.allocate(Identity::new("c")), VoterId::new(3));
        assert_eq!(alloc.next_id(), VoterId::new(4));
    }

    #[test]
    fn test_reverse_index_maps_back() {
        let mut alloc = IdAllocator::new();
        let id = alloc.allocate(Identity::new("alice"));
        assert_eq!(alloc.lookup(id), Some(&Identity::new("alice")));
        assert_eq!(alloc.lookup(VoterId::new(99)), None);
    }

    #[test]
    fn test_reset_forward_only() {
        let mut alloc = IdAllocator::new();
        alloc.allocate(Identity::new("a"));
        // Counter is at 2: equal and smaller values are rejected.
        let err = alloc.reset(VoterId::new(2)).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidId { .. }));
        assert!(alloc.reset(VoterId::new(1)).is_err());

        alloc.reset(VoterId::new(100)).expect("forward reset");
        assert_eq!(alloc.next_id(), VoterId::new(100));
        // Existing assignments survive a reset.
        assert_eq!(alloc.lookup(VoterId::new(1)), Some(&Identity::new("a")));
    }

    #[test]
    fn test_allocation_after_reset_leaves_gap() {
        let mut alloc = IdAllocator::new();
        alloc.allocate(Identity::new("a"));
        alloc.reset(VoterId::new(50)).expect("reset");
        assert_eq!(alloc.allocate(Identity::new("b")), VoterId::new(50));
        let ids: Vec<_> = alloc.assignments().map(|(id, _)| id.value()).collect();
        assert_eq!(ids, vec![1, 50]);
    }
}
