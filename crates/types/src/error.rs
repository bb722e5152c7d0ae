//! Error types for the voter registry using snafu.
//!
//! Every failed call has zero side effects and reports its kind directly to
//! the caller. There is no retry logic inside the registry, no recovery,
//! and no failure is fatal to the hosting process: each [`RegistryError`]
//! variant maps to an [`ErrorCode`] with a unique numeric identifier,
//! retryability classification, and suggested recovery action.

use core::fmt;

use snafu::Snafu;

use crate::types::{Identity, VoterId, VoterStatus};

/// Unified result type for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

/// Machine-readable error codes for programmatic error handling.
///
/// Each [`RegistryError`] variant maps to a unique numeric code. Codes are
/// organized into ranges:
///
/// | Range     | Domain          | Examples                                |
/// |-----------|-----------------|-----------------------------------------|
/// | 1000–1099 | Access control  | Missing role, rejected identity value   |
/// | 1100–1199 | Availability    | Global pause                            |
/// | 2000–2099 | Lifecycle       | Duplicate/missing record, bad transition|
/// | 3000–3099 | Allocator       | Non-increasing reset, unknown id        |
/// | 3100–3199 | Call surface    | Batch bound violation                   |
///
/// Codes are transmitted as the string representation of their numeric value
/// (e.g., `"1000"`) wherever a host surfaces them to external callers. Use
/// [`ErrorCode::as_u16`] for serialization and [`ErrorCode::from_u16`] for
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // --- Access control (1000–1099) ---
    /// Caller lacks the role the operation requires.
    NotAuthorized = 1000,
    /// Empty identity rejected as an admin/official value.
    ZeroIdentity = 1001,
    /// Identity value rejected for a reason other than emptiness
    /// (e.g., admin self-transfer).
    InvalidTarget = 1002,

    // --- Availability (1100–1199) ---
    /// System-wide halt is in effect.
    Paused = 1100,

    // --- Lifecycle (2000–2099) ---
    /// Identity already has a record.
    AlreadyRegistered = 2000,
    /// Operation targets an identity with no record.
    NotRegistered = 2001,
    /// Requested transition is illegal from the current status.
    InvalidStatus = 2002,

    // --- Allocator (3000–3099) ---
    /// Counter reset not strictly increasing, or id lookup miss.
    InvalidId = 3000,

    // --- Call surface (3100–3199) ---
    /// Batch exceeds the configured element bound.
    BatchLimitExceeded = 3100,
}

impl ErrorCode {
    /// Returns the numeric code value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Converts a numeric code to an `ErrorCode`, returning `None` for
    /// unknown values.
    #[must_use]
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1000 => Some(Self::NotAuthorized),
            1001 => Some(Self::ZeroIdentity),
            1002 => Some(Self::InvalidTarget),
            1100 => Some(Self::Paused),
            2000 => Some(Self::AlreadyRegistered),
            2001 => Some(Self::NotRegistered),
            2002 => Some(Self::InvalidStatus),
            3000 => Some(Self::InvalidId),
            3100 => Some(Self::BatchLimitExceeded),
            _ => None,
        }
    }

    /// Whether this error is retryable.
    ///
    /// Only [`ErrorCode::Paused`] may succeed on a later attempt without any
    /// corrective action, since once the admin unpauses, prior behavior is
    /// restored exactly. Every other kind requires a state or request change
    /// before retrying.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Suggested recovery action for this error code.
    ///
    /// Returns a human-readable string describing what the caller should do.
    /// This guidance is stable and safe to display in UIs or operator logs.
    #[must_use]
    pub const fn suggested_action(self) -> &'static str {
        match self {
            Self::NotAuthorized => {
                "Submit the call from the admin or a delegated official, or ask the admin to delegate the caller."
            },
            Self::ZeroIdentity => "Supply a non-empty identity for the admin or official target.",
            Self::InvalidTarget => {
                "Choose a different target identity. Admin transfer to the caller itself is rejected."
            },
            Self::Paused => "Wait for the admin to unpause the registry, then resubmit unchanged.",
            Self::AlreadyRegistered => {
                "Not an error for the original registration. Use update_metadata to change the stored digest."
            },
            Self::NotRegistered => "Register the identity first, then retry the operation.",
            Self::InvalidStatus => {
                "Re-read the record's current status. Approval requires pending; revocation requires a non-revoked record."
            },
            Self::InvalidId => {
                "For resets, choose a value strictly greater than the current counter. For lookups, verify the id was ever assigned."
            },
            Self::BatchLimitExceeded => "Split the batch into chunks within the configured bound.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Top-level error type for registry operations.
///
/// # Recovery Guide
///
/// | Variant              | Retryable | Recovery Action                                |
/// | -------------------- | --------- | ---------------------------------------------- |
/// | `NotAuthorized`      | No        | Call as admin/official, or get delegated       |
/// | `ZeroIdentity`       | No        | Supply a non-empty identity                    |
/// | `InvalidTarget`      | No        | Pick a target other than the caller            |
/// | `Paused`             | Yes       | Wait for unpause; resubmit unchanged           |
/// | `AlreadyRegistered`  | No        | Original record stands; update metadata instead|
/// | `NotRegistered`      | No        | Register first                                 |
/// | `InvalidStatus`      | No        | Re-read status; transition is one-directional  |
/// | `InvalidId`          | No        | Reset forward-only; verify id was assigned     |
/// | `UnknownId`          | No        | Verify id was assigned                         |
/// | `BatchLimitExceeded` | No        | Chunk the batch                                |
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistryError {
    /// Caller lacks the role the operation requires.
    #[snafu(display("caller {caller} lacks the required role"))]
    NotAuthorized {
        /// The rejected caller.
        caller: Identity,
    },

    /// Empty identity rejected as an admin/official value.
    ///
    /// An empty identity can never hold administrative control.
    #[snafu(display("empty identity rejected"))]
    ZeroIdentity,

    /// Identity value rejected for a reason other than emptiness.
    #[snafu(display("invalid target identity: {reason}"))]
    InvalidTarget {
        /// Why the target was rejected.
        reason: String,
    },

    /// System-wide halt is in effect; all non-admin mutations fail.
    #[snafu(display("registry is paused"))]
    Paused,

    /// Identity already has a record. The first record stands unmodified.
    #[snafu(display("{voter} is already registered"))]
    AlreadyRegistered {
        /// The duplicate registrant.
        voter: Identity,
    },

    /// Operation targets an identity with no record.
    #[snafu(display("{voter} is not registered"))]
    NotRegistered {
        /// The unknown identity.
        voter: Identity,
    },

    /// Requested transition is illegal from the record's current status.
    #[snafu(display("illegal transition for {voter}: status is {status}"))]
    InvalidStatus {
        /// The targeted registrant.
        voter: Identity,
        /// The record's current status.
        status: VoterStatus,
    },

    /// Counter reset value is not strictly greater than the current counter.
    #[snafu(display("next-id reset to {requested} rejected: counter is at {current}"))]
    InvalidId {
        /// The current counter value.
        current: VoterId,
        /// The rejected reset value.
        requested: VoterId,
    },

    /// No record carries the looked-up id.
    ///
    /// Same kind as [`RegistryError::InvalidId`] on the wire
    /// ([`ErrorCode::InvalidId`]); kept a separate variant so lookups carry
    /// the missing id rather than counter context.
    #[snafu(display("no voter registered under {id}"))]
    UnknownId {
        /// The id with no assignment.
        id: VoterId,
    },

    /// Batch exceeds the configured element bound.
    #[snafu(display("batch of {len} exceeds the bound of {max}"))]
    BatchLimitExceeded {
        /// Submitted batch length.
        len: usize,
        /// Configured bound.
        max: usize,
    },
}

impl RegistryError {
    /// Returns the machine-readable error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotAuthorized { .. } => ErrorCode::NotAuthorized,
            Self::ZeroIdentity => ErrorCode::ZeroIdentity,
            Self::InvalidTarget { .. } => ErrorCode::InvalidTarget,
            Self::Paused => ErrorCode::Paused,
            Self::AlreadyRegistered { .. } => ErrorCode::AlreadyRegistered,
            Self::NotRegistered { .. } => ErrorCode::NotRegistered,
            Self::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            Self::InvalidId { .. } | Self::UnknownId { .. } => ErrorCode::InvalidId,
            Self::BatchLimitExceeded { .. } => ErrorCode::BatchLimitExceeded,
        }
    }

    /// Whether this error is retryable. Delegates to
    /// [`ErrorCode::is_retryable`] for consistency with the wire format.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }

    /// Suggested recovery action. Delegates to
    /// [`ErrorCode::suggested_action`].
    #[must_use]
    pub const fn suggested_action(&self) -> &'static str {
        self.code().suggested_action()
    }
}
