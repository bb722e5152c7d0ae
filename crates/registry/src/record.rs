//! Lifecycle transitions for voter records.
//!
//! Status moves forward only: `Pending → Approved`,
//! `Pending | Approved → Revoked`. Approval is one-directional out of
//! `Pending` so an already-approved or already-revoked record can never be
//! re-approved. Revocation by an authority rejects an already-revoked
//! record, while self-revocation is an idempotent overwrite. The asymmetry
//! is part of the public contract.
//!
//! The cached `eligibility` flag is updated inside every transition, so it
//! equals `status == Approved` whenever a mutation completes.

use rollbook_types::{Identity, MetadataHash, RegistryError, Result, VoterRecord, VoterStatus};

/// Approves a pending record.
///
/// # Errors
///
/// Returns `InvalidStatus` unless the record is exactly `Pending`.
pub fn approve(record: &mut VoterRecord, voter: &Identity) -> Result<()> {
    if record.status != VoterStatus::Pending {
        return Err(RegistryError::InvalidStatus { voter: voter.clone(), status: record.status });
    }
    record.status = VoterStatus::Approved;
    record.eligibility = true;
    Ok(())
}

/// Revokes a record from any non-revoked status.
///
/// Rejecting a pending application and revoking an approved voter are the
/// same transition.
///
/// # Errors
///
/// Returns `InvalidStatus` if the record is already `Revoked`.
pub fn revoke(record: &mut VoterRecord, voter: &Identity) -> Result<()> {
    if record.status == VoterStatus::Revoked {
        return Err(RegistryError::InvalidStatus { voter: voter.clone(), status: record.status });
    }
    record.status = VoterStatus::Revoked;
    record.eligibility = false;
    Ok(())
}

/// Self-revocation: unconditional overwrite to `Revoked`.
///
/// Unlike [`revoke`] there is no already-revoked guard: reapplying is a
/// harmless idempotent overwrite that still counts as success.
pub fn self_revoke(record: &mut VoterRecord) {
    record.status = VoterStatus::Revoked;
    record.eligibility = false;
}

/// Replaces the stored metadata digest. Status and eligibility untouched.
pub fn set_metadata(record: &mut VoterRecord, new_hash: MetadataHash) {
    record.metadata_hash = new_hash;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;
    use rollbook_types::{VoterId, ZERO_METADATA, sha256};

    fn pending() -> (VoterRecord, Identity) {
        (VoterRecord::new_pending(VoterId::new(1), 10, ZERO_METADATA), Identity::new("alice"))
    }

    #[test]
    fn test_approve_from_pending() {
        let (mut rec, alice) = pending();
        approve(&mut rec, &alice).expect("approve pending");
        assert_eq!(rec.status, VoterStatus::Approved);
        assert!(rec.eligibility);
        assert!(rec.is_eligible());
    }

    #[test]
    fn test_approve_twice_rejected() {
        let (mut rec, alice) = pending();
        approve(&mut rec, &alice).expect("first approve");
        let err = approve(&mut rec, &alice).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidStatus { status: VoterStatus::Approved, .. }
        ));
        // The first approval stands.
        assert_eq!(rec.status, VoterStatus::Approved);
    }

    #[test]
    fn test_approve_revoked_rejected() {
        let (mut rec, alice) = pending();
        revoke(&mut rec, &alice).expect("revoke pending");
        let err = approve(&mut rec, &alice).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidStatus { status: VoterStatus::Revoked, .. }
        ));
    }

    #[test]
    fn test_revoke_from_pending_and_approved() {
        let (mut rec, alice) = pending();
        revoke(&mut rec, &alice).expect("revoke pending");
        assert_eq!(rec.status, VoterStatus::Revoked);
        assert!(!rec.eligibility);

        let (mut rec, alice) = pending();
        approve(&mut rec, &alice).expect("approve");
        revoke(&mut rec, &alice).expect("revoke approved");
        assert_eq!(rec.status, VoterStatus::Revoked);
        assert!(!rec.eligibility);
    }

    #[test]
    fn test_revoke_twice_rejected() {
        let (mut rec, alice) = pending();
        revoke(&mut rec, &alice).expect("first revoke");
        let err = revoke(&mut rec, &alice).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidStatus { status: VoterStatus::Revoked, .. }
        ));
    }

    #[test]
    fn test_self_revoke_is_idempotent() {
        let (mut rec, _) = pending();
        self_revoke(&mut rec);
        assert_eq!(rec.status, VoterStatus::Revoked);
        // No guard: applying again succeeds and changes nothing.
        self_revoke(&mut rec);
        assert_eq!(rec.status, VoterStatus::Revoked);
        assert!(!rec.eligibility);
    }

    #[test]
    fn test_set_metadata_leaves_status_alone() {
        let (mut rec, alice) = pending();
        approve(&mut rec, &alice).expect("approve");
        set_metadata(&mut rec, sha256(b"new"));
        assert_eq!(rec.metadata_hash, sha256(b"new"));
        assert_eq!(rec.status, VoterStatus::Approved);
        assert!(rec.eligibility);
    }
}
