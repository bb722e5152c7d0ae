//! Registry core for rollbook.
//!
//! This crate owns the voter lifecycle state machine and everything that
//! fronts it:
//!
//! - Role resolution and authorization gates (admin / official / ordinary)
//! - Lifecycle transitions with forward-only status semantics
//! - Sequential registration-id allocation with a reverse lookup index
//! - The serialized public call surface, including best-effort batches
//! - Audit event emission through an injected sink port
//! - Snapshot persistence for hosts with durable storage
//!
//! The consensus/ledger substrate is an external collaborator: it supplies
//! an authenticated caller and a monotonic height via [`CallContext`], and
//! consumes audit events through the [`EventSink`] port.

#![deny(unsafe_code)]

mod access;
mod allocator;
mod record;
mod registry;
mod sink;
mod snapshot;
mod state;

pub use access::Role;
pub use allocator::IdAllocator;
pub use registry::{CallContext, Registry};
pub use sink::{EventSink, MemorySink, NullSink, WriterSink};
pub use snapshot::{
    SNAPSHOT_VERSION, SnapshotError, SnapshotMeta, decode_snapshot, encode_snapshot,
    read_snapshot, write_snapshot,
};
pub use state::{InvariantViolation, RegistryState};
