//! Audit event definitions for the registry's append-only output channel.
//!
//! Every successful mutating operation emits exactly one [`RegistryEvent`].
//! Events are fire-and-forget, ordered, carry no acknowledgment, and are the
//! system's sole audit trail: downstream indexers depend on the exact JSON
//! shape produced here.
//!
//! # Wire Format
//!
//! Events serialize as internally-tagged JSON with tag field `event` and
//! kebab-case names, e.g.:
//!
//! ```json
//! {"event":"voter-approved","voter":"user:alice","id":1}
//! ```
//!
//! Field names and value shapes are frozen; the
//! `test_event_json_is_byte_stable` test pins every variant. Renaming a
//! field or reordering declarations is a breaking change for indexers.

use serde::{Deserialize, Serialize};

use crate::types::{Identity, VoterId};

/// A structured audit event, one per successful mutation.
///
/// Batch operations emit no batch-level event; each successful element emits
/// its own singular event as a side effect of the underlying operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum RegistryEvent {
    /// A new identity registered; record created in `pending` status.
    #[serde(rename = "voter-registered")]
    VoterRegistered {
        /// The registrant.
        voter: Identity,
        /// The allocated registration id.
        id: VoterId,
    },

    /// A pending record was approved by the admin or an official.
    #[serde(rename = "voter-approved")]
    VoterApproved {
        /// The approved registrant.
        voter: Identity,
        /// The registrant's id.
        id: VoterId,
    },

    /// A record was revoked by the admin or an official.
    #[serde(rename = "voter-revoked")]
    VoterRevoked {
        /// The revoked registrant.
        voter: Identity,
        /// The registrant's id.
        id: VoterId,
    },

    /// A registrant revoked their own record.
    #[serde(rename = "voter-self-revoked")]
    VoterSelfRevoked {
        /// The self-revoking registrant.
        voter: Identity,
        /// The registrant's id.
        id: VoterId,
    },

    /// A registrant replaced their stored metadata digest.
    #[serde(rename = "metadata-updated")]
    MetadataUpdated {
        /// The registrant.
        voter: Identity,
        /// The registrant's id.
        id: VoterId,
    },

    /// Administrative control moved to a new identity.
    #[serde(rename = "admin-transferred")]
    AdminTransferred {
        /// The outgoing admin.
        previous: Identity,
        /// The incoming admin.
        new: Identity,
    },

    /// An identity was granted delegated authority.
    #[serde(rename = "official-added")]
    OfficialAdded {
        /// The delegated identity.
        official: Identity,
    },

    /// An identity's delegated authority was removed.
    #[serde(rename = "official-removed")]
    OfficialRemoved {
        /// The removed identity.
        official: Identity,
    },

    /// The global pause flag changed.
    #[serde(rename = "paused-set")]
    PausedSet {
        /// The new flag value.
        paused: bool,
    },

    /// The id counter was moved forward by the admin.
    #[serde(rename = "next-id-reset")]
    NextIdReset {
        /// Counter value before the reset.
        previous: VoterId,
        /// Counter value after the reset.
        new: VoterId,
    },
}

impl RegistryEvent {
    /// Returns the event's wire name (the `event` tag value).
    pub const fn name(&self) -> &'static str {
        match self {
            RegistryEvent::VoterRegistered { .. } => "voter-registered",
            RegistryEvent::VoterApproved { .. } => "voter-approved",
            RegistryEvent::VoterRevoked { .. } => "voter-revoked",
            RegistryEvent::VoterSelfRevoked { .. } => "voter-self-revoked",
            RegistryEvent::MetadataUpdated { .. } => "metadata-updated",
            RegistryEvent::AdminTransferred { .. } => "admin-transferred",
            RegistryEvent::OfficialAdded { .. } => "official-added",
            RegistryEvent::OfficialRemoved { .. } => "official-removed",
            RegistryEvent::PausedSet { .. } => "paused-set",
            RegistryEvent::NextIdReset { .. } => "next-id-reset",
        }
    }

    /// Serializes the event to its canonical JSON wire form.
    ///
    /// Infallible for this type: every variant is a flat struct of
    /// serializable fields.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            // Unreachable for this enum; surface loudly if a refactor breaks it.
            panic!("event serialization failed: {e}")
        })
    }
}
