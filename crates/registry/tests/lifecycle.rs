//! End-to-end lifecycle tests for the registry call surface.
//!
//! Exercises the full flow the way a hosting environment would drive it:
//! officials delegated by the admin, registrants moving through
//! pending/approved/revoked, pause windows, and best-effort batches, with
//! the audit trail captured through a memory sink and asserted alongside
//! state.

// Test code is allowed to use unwrap for simplicity
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]

use std::sync::Arc;

use rollbook_registry::{CallContext, MemorySink, Registry};
use rollbook_test_utils::fixtures;
use rollbook_types::{ErrorCode, Identity, RegistryEvent, VoterId, VoterStatus, ZERO_METADATA};

fn setup() -> (Registry, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let registry = Registry::new(fixtures::admin(), sink.clone());
    (registry, sink)
}

fn ctx(identity: &Identity, height: u64) -> CallContext {
    CallContext::new(identity.clone(), height)
}

/// The full delegation-and-lifecycle walk:
/// admin delegates O; O probes an unregistered identity; V registers with a
/// zero digest and gets id 1; O approves V; admin revokes V; O's re-approval
/// bounces off the terminal status.
#[test]
fn official_delegation_lifecycle_walk() {
    let (registry, sink) = setup();
    let admin = fixtures::admin();
    let officer = fixtures::official();
    let v = fixtures::voter("v");

    registry.add_official(&ctx(&admin, 1), officer.clone()).expect("delegate officer");

    // Approving an identity that never registered.
    let err = registry.approve(&ctx(&officer, 2), &fixtures::voter("x")).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotRegistered);

    // V registers with a 32-byte zero hash.
    let id = registry.register(&ctx(&v, 3), ZERO_METADATA).expect("register v");
    assert_eq!(id, VoterId::new(1));
    let record = registry.get_record(&v).expect("record");
    assert_eq!(record.status, VoterStatus::Pending);
    assert!(!registry.is_eligible(&v));

    // O approves V.
    registry.approve(&ctx(&officer, 4), &v).expect("approve v");
    let record = registry.get_record(&v).expect("record");
    assert_eq!(record.status, VoterStatus::Approved);
    assert!(record.eligibility);
    assert!(registry.is_eligible(&v));

    // Admin revokes V.
    registry.revoke(&ctx(&admin, 5), &v).expect("revoke v");
    let record = registry.get_record(&v).expect("record");
    assert_eq!(record.status, VoterStatus::Revoked);
    assert!(!record.eligibility);
    assert!(!registry.is_eligible(&v));

    // O attempts to approve V again.
    let err = registry.approve(&ctx(&officer, 6), &v).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidStatus);

    // The audit trail reflects exactly the successful mutations, in order.
    let names: Vec<_> = sink.events().iter().map(RegistryEvent::name).collect();
    assert_eq!(
        names,
        vec!["official-added", "voter-registered", "voter-approved", "voter-revoked"]
    );
}

#[test]
fn ids_are_strictly_increasing_and_map_back() {
    let (registry, _) = setup();
    let mut previous = VoterId::new(0);
    for i in 0..20 {
        let voter = fixtures::voter(&format!("v{i}"));
        let id = registry.register(&ctx(&voter, i), fixtures::metadata("m")).expect("register");
        assert!(id > previous, "id {id} not above {previous}");
        previous = id;
        let record = registry.get_record_by_id(id).expect("reverse lookup");
        assert_eq!(record.id, id);
        assert_eq!(registry.get_record(&voter).expect("forward lookup").id, id);
    }
}

#[test]
fn pause_window_blocks_everything_but_administration() {
    let (registry, _) = setup();
    let admin = fixtures::admin();
    let officer = fixtures::official();
    let v = fixtures::voter("v");

    registry.add_official(&ctx(&admin, 1), officer.clone()).expect("delegate");
    registry.register(&ctx(&v, 2), ZERO_METADATA).expect("register");
    registry.set_paused(&ctx(&admin, 3), true).expect("pause");
    assert!(registry.is_paused());

    assert_eq!(
        registry.approve(&ctx(&officer, 4), &v).unwrap_err().code(),
        ErrorCode::Paused
    );
    assert_eq!(
        registry.batch_revoke(&ctx(&officer, 5), &[v.clone()]).unwrap_err().code(),
        ErrorCode::Paused
    );
    assert_eq!(registry.self_revoke(&ctx(&v, 6)).unwrap_err().code(), ErrorCode::Paused);

    // Unpausing restores prior behavior exactly.
    registry.set_paused(&ctx(&admin, 7), false).expect("unpause");
    registry.approve(&ctx(&officer, 8), &v).expect("approve after unpause");
}

/// Mixed batch: A eligible, B already approved, C missing. The call
/// succeeds with count 1, A approved, B and C untouched.
#[test]
fn batch_approve_partial_success() {
    let (registry, _) = setup();
    let admin = fixtures::admin();
    let a = fixtures::voter("a");
    let b = fixtures::voter("b");
    let c = fixtures::voter("c");

    registry.register(&ctx(&a, 1), ZERO_METADATA).expect("register a");
    registry.register(&ctx(&b, 2), ZERO_METADATA).expect("register b");
    registry.approve(&ctx(&admin, 3), &b).expect("approve b");

    let count = registry
        .batch_approve(&ctx(&admin, 4), &[a.clone(), b.clone(), c.clone()])
        .expect("batch");
    assert_eq!(count, 1);
    assert_eq!(registry.get_record(&a).expect("a").status, VoterStatus::Approved);
    assert_eq!(registry.get_record(&b).expect("b").status, VoterStatus::Approved);
    assert_eq!(registry.get_record(&c).unwrap_err().code(), ErrorCode::NotRegistered);
}

#[test]
fn reset_next_id_moves_allocation_forward_only() {
    let (registry, _) = setup();
    let admin = fixtures::admin();
    let a = fixtures::voter("a");
    registry.register(&ctx(&a, 1), ZERO_METADATA).expect("register");

    // At or below the counter: rejected.
    assert_eq!(
        registry.reset_next_id(&ctx(&admin, 2), VoterId::new(2)).unwrap_err().code(),
        ErrorCode::InvalidId
    );

    registry.reset_next_id(&ctx(&admin, 3), VoterId::new(1000)).expect("reset");
    assert_eq!(registry.next_id(), VoterId::new(1000));

    let b = fixtures::voter("b");
    let id = registry.register(&ctx(&b, 4), ZERO_METADATA).expect("register after reset");
    assert_eq!(id, VoterId::new(1000));

    // Previously assigned ids remain valid lookups.
    assert_eq!(registry.get_record_by_id(VoterId::new(1)).expect("old id").id, VoterId::new(1));
}

#[test]
fn self_revoke_needs_no_role_and_ignores_status() {
    let (registry, _) = setup();
    let admin = fixtures::admin();
    let v = fixtures::voter("v");

    registry.register(&ctx(&v, 1), ZERO_METADATA).expect("register");
    registry.approve(&ctx(&admin, 2), &v).expect("approve");
    registry.self_revoke(&ctx(&v, 3)).expect("self revoke approved");
    assert_eq!(registry.get_record(&v).expect("record").status, VoterStatus::Revoked);

    // Re-revoking oneself succeeds where an authority's revoke fails.
    registry.self_revoke(&ctx(&v, 4)).expect("self revoke revoked");
    assert_eq!(
        registry.revoke(&ctx(&admin, 5), &v).unwrap_err().code(),
        ErrorCode::InvalidStatus
    );
}

#[test]
fn event_wire_shape_matches_indexer_contract() {
    let (registry, sink) = setup();
    let v = fixtures::voter("v");
    registry.register(&ctx(&v, 1), ZERO_METADATA).expect("register");
    registry.approve(&ctx(&fixtures::admin(), 2), &v).expect("approve");

    let events = sink.events();
    assert_eq!(
        events[1].to_json(),
        r#"{"event":"voter-approved","voter":"voter:v","id":1}"#
    );
}
