//! The registry's public call surface.
//!
//! A [`Registry`] is one explicitly owned state object behind a handle, not
//! an ambient singleton. Every call is a complete, serialized read-modify-write
//! unit: the state sits behind a single `parking_lot::RwLock`, mutations
//! take the write lock for their whole duration, and a call either commits
//! all its effects or fails with zero side effects. Audit events are emitted
//! to the injected sink while the write lock is held, so sink order equals
//! commit order.
//!
//! Check order in every mutating call follows the same discipline: role
//! gate first, pause gate second, then lifecycle/allocator checks.

use std::sync::Arc;

use parking_lot::RwLock;

use rollbook_types::{
    ConfigError, Identity, MetadataHash, RegistryConfig, RegistryError, RegistryEvent, Result,
    VoterId, VoterRecord,
};

use crate::access::{self, Role};
use crate::record;
use crate::sink::EventSink;
use crate::state::RegistryState;

/// Per-call context supplied by the host environment.
///
/// The environment authenticates the caller and advances the height counter;
/// the registry never does either itself.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Authenticated caller identity.
    pub caller: Identity,
    /// Current value of the environment's monotonic height counter.
    pub height: u64,
}

impl CallContext {
    /// Creates a call context.
    pub fn new(caller: impl Into<Identity>, height: u64) -> Self {
        Self { caller: caller.into(), height }
    }
}

/// A permissioned voter registry instance.
pub struct Registry {
    config: RegistryConfig,
    state: RwLock<RegistryState>,
    sink: Arc<dyn EventSink>,
}

impl Registry {
    /// Creates a registry with the default configuration, administered by
    /// `admin`, emitting audit events to `sink`.
    pub fn new(admin: Identity, sink: Arc<dyn EventSink>) -> Self {
        Self {
            config: RegistryConfig::default(),
            state: RwLock::new(RegistryState::new(admin)),
            sink,
        }
    }

    /// Creates a registry with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the configuration is invalid.
    pub fn with_config(
        admin: Identity,
        config: RegistryConfig,
        sink: Arc<dyn EventSink>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, state: RwLock::new(RegistryState::new(admin)), sink })
    }

    /// Restores a registry from previously persisted state (see
    /// [`crate::snapshot`]).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the configuration is invalid.
    pub fn from_state(
        state: RegistryState,
        config: RegistryConfig,
        sink: Arc<dyn EventSink>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, state: RwLock::new(state), sink })
    }

    /// Returns a copy of the current state, e.g. for snapshot persistence.
    pub fn snapshot_state(&self) -> RegistryState {
        self.state.read().clone()
    }

    // ========================================================================
    // Administrative operations (admin-only, exempt from the pause gate)
    // ========================================================================

    /// Transfers administrative control to `new_admin`.
    ///
    /// Rejects an empty identity and a transfer to the caller itself, so
    /// administrative control always lands on a distinct, non-empty
    /// identity. There is deliberately no check that `new_admin` differs
    /// from the current admin beyond the self-transfer check.
    ///
    /// # Errors
    ///
    /// `NotAuthorized`, `ZeroIdentity`, `InvalidTarget`.
    pub fn transfer_admin(&self, ctx: &CallContext, new_admin: Identity) -> Result<()> {
        let mut state = self.state.write();
        access::require_admin(&state, &ctx.caller)?;
        if new_admin.is_empty() {
            return Err(RegistryError::ZeroIdentity);
        }
        if new_admin == ctx.caller {
            return Err(RegistryError::InvalidTarget {
                reason: "admin transfer to the caller itself".to_string(),
            });
        }
        let previous = std::mem::replace(&mut state.admin, new_admin.clone());
        tracing::info!(previous = %previous, new = %new_admin, "admin transferred");
        self.sink.emit(&RegistryEvent::AdminTransferred { previous, new: new_admin });
        Ok(())
    }

    /// Sets the global pause flag.
    ///
    /// # Errors
    ///
    /// `NotAuthorized`.
    pub fn set_paused(&self, ctx: &CallContext, paused: bool) -> Result<()> {
        let mut state = self.state.write();
        access::require_admin(&state, &ctx.caller)?;
        state.paused = paused;
        tracing::info!(paused, "pause flag set");
        self.sink.emit(&RegistryEvent::PausedSet { paused });
        Ok(())
    }

    /// Grants delegated approve/revoke authority to `official`.
    ///
    /// # Errors
    ///
    /// `NotAuthorized`, `ZeroIdentity`.
    pub fn add_official(&self, ctx: &CallContext, official: Identity) -> Result<()> {
        let mut state = self.state.write();
        access::require_admin(&state, &ctx.caller)?;
        if official.is_empty() {
            return Err(RegistryError::ZeroIdentity);
        }
        state.officials.insert(official.clone());
        tracing::info!(official = %official, "official added");
        self.sink.emit(&RegistryEvent::OfficialAdded { official });
        Ok(())
    }

    /// Removes delegated authority from `official`. Removing a non-member is
    /// a successful no-op, matching set semantics.
    ///
    /// # Errors
    ///
    /// `NotAuthorized`, `ZeroIdentity`.
    pub fn remove_official(&self, ctx: &CallContext, official: Identity) -> Result<()> {
        let mut state = self.state.write();
        access::require_admin(&state, &ctx.caller)?;
        if official.is_empty() {
            return Err(RegistryError::ZeroIdentity);
        }
        state.officials.remove(&official);
        tracing::info!(official = %official, "official removed");
        self.sink.emit(&RegistryEvent::OfficialRemoved { official });
        Ok(())
    }

    /// Moves the id counter forward to `new_id`.
    ///
    /// Forward-only: values at or below the current counter are rejected.
    /// Existing records and the reverse index are untouched, so id gaps are
    /// a legal and expected outcome.
    ///
    /// # Errors
    ///
    /// `NotAuthorized`, `InvalidId`.
    pub fn reset_next_id(&self, ctx: &CallContext, new_id: VoterId) -> Result<()> {
        let mut state = self.state.write();
        access::require_admin(&state, &ctx.caller)?;
        let previous = state.allocator.next_id();
        state.allocator.reset(new_id)?;
        tracing::info!(previous = %previous, new = %new_id, "next-id counter reset");
        self.sink.emit(&RegistryEvent::NextIdReset { previous, new: new_id });
        Ok(())
    }

    // ========================================================================
    // Self-service operations (no role required)
    // ========================================================================

    /// Registers the caller with the given metadata digest.
    ///
    /// Creates a `pending` record with a freshly allocated id and the
    /// context height as its registration height.
    ///
    /// # Errors
    ///
    /// `Paused`, `AlreadyRegistered`.
    pub fn register(&self, ctx: &CallContext, metadata_hash: MetadataHash) -> Result<VoterId> {
        let mut state = self.state.write();
        Self::require_unpaused(&state)?;
        if state.records.contains_key(&ctx.caller) {
            return Err(RegistryError::AlreadyRegistered { voter: ctx.caller.clone() });
        }
        let id = state.allocator.allocate(ctx.caller.clone());
        state.records.insert(
            ctx.caller.clone(),
            VoterRecord::new_pending(id, ctx.height, metadata_hash),
        );
        tracing::debug!(voter = %ctx.caller, id = %id, height = ctx.height, "voter registered");
        self.sink.emit(&RegistryEvent::VoterRegistered { voter: ctx.caller.clone(), id });
        Ok(id)
    }

    /// Revokes the caller's own record, regardless of its current status.
    ///
    /// Unlike [`Registry::revoke`] there is no authorization gate and no
    /// already-revoked guard: any registrant may revoke themself, and
    /// re-revoking is a harmless idempotent overwrite that still emits an
    /// event. The asymmetry with `revoke` is deliberate.
    ///
    /// # Errors
    ///
    /// `Paused`, `NotRegistered`.
    pub fn self_revoke(&self, ctx: &CallContext) -> Result<()> {
        let mut state = self.state.write();
        Self::require_unpaused(&state)?;
        let record = state
            .records
            .get_mut(&ctx.caller)
            .ok_or_else(|| RegistryError::NotRegistered { voter: ctx.caller.clone() })?;
        record::self_revoke(record);
        let id = record.id;
        tracing::debug!(voter = %ctx.caller, id = %id, "voter self-revoked");
        self.sink.emit(&RegistryEvent::VoterSelfRevoked { voter: ctx.caller.clone(), id });
        Ok(())
    }

    /// Replaces the caller's stored metadata digest. Status and eligibility
    /// are untouched. Permissive by design: any caller with a record may
    /// update their own digest, in any status.
    ///
    /// # Errors
    ///
    /// `Paused`, `NotRegistered`.
    pub fn update_metadata(&self, ctx: &CallContext, new_hash: MetadataHash) -> Result<()> {
        let mut state = self.state.write();
        Self::require_unpaused(&state)?;
        let record = state
            .records
            .get_mut(&ctx.caller)
            .ok_or_else(|| RegistryError::NotRegistered { voter: ctx.caller.clone() })?;
        record::set_metadata(record, new_hash);
        let id = record.id;
        tracing::debug!(voter = %ctx.caller, id = %id, "metadata updated");
        self.sink.emit(&RegistryEvent::MetadataUpdated { voter: ctx.caller.clone(), id });
        Ok(())
    }

    // ========================================================================
    // Lifecycle operations (admin or official)
    // ========================================================================

    /// Approves a pending registrant.
    ///
    /// # Errors
    ///
    /// `NotAuthorized`, `Paused`, `NotRegistered`, `InvalidStatus`.
    pub fn approve(&self, ctx: &CallContext, voter: &Identity) -> Result<()> {
        let mut state = self.state.write();
        access::require_authorized(&state, &ctx.caller)?;
        Self::require_unpaused(&state)?;
        let id = Self::approve_locked(&mut state, voter)?;
        tracing::debug!(voter = %voter, id = %id, by = %ctx.caller, "voter approved");
        self.sink.emit(&RegistryEvent::VoterApproved { voter: voter.clone(), id });
        Ok(())
    }

    /// Revokes a registrant from any non-revoked status. Rejecting a pending
    /// application and revoking an approved voter are the same operation.
    ///
    /// # Errors
    ///
    /// `NotAuthorized`, `Paused`, `NotRegistered`, `InvalidStatus`.
    pub fn revoke(&self, ctx: &CallContext, voter: &Identity) -> Result<()> {
        let mut state = self.state.write();
        access::require_authorized(&state, &ctx.caller)?;
        Self::require_unpaused(&state)?;
        let id = Self::revoke_locked(&mut state, voter)?;
        tracing::debug!(voter = %voter, id = %id, by = %ctx.caller, "voter revoked");
        self.sink.emit(&RegistryEvent::VoterRevoked { voter: voter.clone(), id });
        Ok(())
    }

    /// Approves each identity in `voters`, best-effort.
    ///
    /// The pause/authorization/bound gate is checked once up front for the
    /// whole batch; a gate failure fails the entire call and processes
    /// nothing. Past the gate, elements that cannot be approved (no record,
    /// wrong status) are silently skipped. Returns the count of elements
    /// that succeeded. The count alone does not identify them, so callers
    /// re-read registry state to learn which. Each success emits its own
    /// singular event; there is no batch-level event.
    ///
    /// # Errors
    ///
    /// `NotAuthorized`, `Paused`, `BatchLimitExceeded`.
    pub fn batch_approve(&self, ctx: &CallContext, voters: &[Identity]) -> Result<usize> {
        let mut state = self.state.write();
        access::require_authorized(&state, &ctx.caller)?;
        Self::require_unpaused(&state)?;
        self.require_within_batch_bound(voters.len())?;

        let mut succeeded = 0;
        for voter in voters {
            if let Ok(id) = Self::approve_locked(&mut state, voter) {
                succeeded += 1;
                self.sink.emit(&RegistryEvent::VoterApproved { voter: voter.clone(), id });
            }
        }
        tracing::debug!(total = voters.len(), succeeded, by = %ctx.caller, "batch approve");
        Ok(succeeded)
    }

    /// Revokes each identity in `voters`, best-effort. Same gate and
    /// partial-success semantics as [`Registry::batch_approve`].
    ///
    /// # Errors
    ///
    /// `NotAuthorized`, `Paused`, `BatchLimitExceeded`.
    pub fn batch_revoke(&self, ctx: &CallContext, voters: &[Identity]) -> Result<usize> {
        let mut state = self.state.write();
        access::require_authorized(&state, &ctx.caller)?;
        Self::require_unpaused(&state)?;
        self.require_within_batch_bound(voters.len())?;

        let mut succeeded = 0;
        for voter in voters {
            if let Ok(id) = Self::revoke_locked(&mut state, voter) {
                succeeded += 1;
                self.sink.emit(&RegistryEvent::VoterRevoked { voter: voter.clone(), id });
            }
        }
        tracing::debug!(total = voters.len(), succeeded, by = %ctx.caller, "batch revoke");
        Ok(succeeded)
    }

    // ========================================================================
    // Read-only queries
    // ========================================================================

    /// True iff the identity's record status is `approved`.
    ///
    /// Recomputed from status; the cached eligibility flag is never
    /// trusted. Unregistered identities are simply ineligible.
    pub fn is_eligible(&self, voter: &Identity) -> bool {
        self.state.read().records.get(voter).is_some_and(VoterRecord::is_eligible)
    }

    /// Returns the identity's record.
    ///
    /// # Errors
    ///
    /// `NotRegistered`.
    pub fn get_record(&self, voter: &Identity) -> Result<VoterRecord> {
        self.state
            .read()
            .records
            .get(voter)
            .cloned()
            .ok_or_else(|| RegistryError::NotRegistered { voter: voter.clone() })
    }

    /// Returns the record registered under `id`, via the reverse index.
    ///
    /// # Errors
    ///
    /// `UnknownId` (wire kind `InvalidId`) if the id was never assigned.
    pub fn get_record_by_id(&self, id: VoterId) -> Result<VoterRecord> {
        let state = self.state.read();
        let identity = state.allocator.lookup(id).ok_or(RegistryError::UnknownId { id })?;
        state
            .records
            .get(identity)
            .cloned()
            .ok_or(RegistryError::UnknownId { id })
    }

    /// The id the next registration will receive.
    pub fn next_id(&self) -> VoterId {
        self.state.read().allocator.next_id()
    }

    /// The current administrator.
    pub fn admin(&self) -> Identity {
        self.state.read().admin.clone()
    }

    /// Whether the global pause is in effect.
    pub fn is_paused(&self) -> bool {
        self.state.read().paused
    }

    /// Whether `identity` holds delegated authority.
    pub fn is_official(&self, identity: &Identity) -> bool {
        access::is_official(&self.state.read(), identity)
    }

    /// Resolves the role `identity` currently holds.
    pub fn role_of(&self, identity: &Identity) -> Role {
        access::resolve_role(&self.state.read(), identity)
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn require_unpaused(state: &RegistryState) -> Result<()> {
        if state.paused { Err(RegistryError::Paused) } else { Ok(()) }
    }

    fn require_within_batch_bound(&self, len: usize) -> Result<()> {
        let max = self.config.max_batch_len;
        if len > max {
            return Err(RegistryError::BatchLimitExceeded { len, max });
        }
        Ok(())
    }

    /// Applies the singular approve transition under an already-held lock.
    /// Shared by the singular operation and the batch loop.
    fn approve_locked(state: &mut RegistryState, voter: &Identity) -> Result<VoterId> {
        let record = state
            .records
            .get_mut(voter)
            .ok_or_else(|| RegistryError::NotRegistered { voter: voter.clone() })?;
        record::approve(record, voter)?;
        Ok(record.id)
    }

    /// Applies the singular revoke transition under an already-held lock.
    fn revoke_locked(state: &mut RegistryState, voter: &Identity) -> Result<VoterId> {
        let record = state
            .records
            .get_mut(voter)
            .ok_or_else(|| RegistryError::NotRegistered { voter: voter.clone() })?;
        record::revoke(record, voter)?;
        Ok(record.id)
    }
}
