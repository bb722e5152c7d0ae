//! Role resolution and authorization gates.
//!
//! Every mutating call resolves the caller's role here before touching the
//! lifecycle state machine, so authorization logic cannot drift between
//! operations. Role resolution is a pure function of current registry state
//! plus the caller identity, with no side effects.

use rollbook_types::{Identity, RegistryError, Result};

use crate::state::RegistryState;

/// The role a caller holds with respect to a registry instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The sole administrator.
    Admin,
    /// An identity with delegated approve/revoke authority.
    Official,
    /// Any other caller. Self-service operations only.
    Ordinary,
}

impl Role {
    /// Returns a snake_case string for logging labels.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Official => "official",
            Role::Ordinary => "ordinary",
        }
    }
}

/// Resolves a caller identity into its role.
pub fn resolve_role(state: &RegistryState, caller: &Identity) -> Role {
    if state.admin == *caller {
        Role::Admin
    } else if state.officials.contains(caller) {
        Role::Official
    } else {
        Role::Ordinary
    }
}

/// True iff the caller is the administrator.
#[inline]
pub fn is_admin(state: &RegistryState, caller: &Identity) -> bool {
    state.admin == *caller
}

/// True iff the caller holds delegated authority.
#[inline]
pub fn is_official(state: &RegistryState, caller: &Identity) -> bool {
    state.officials.contains(caller)
}

/// True iff the caller may approve/revoke other identities.
#[inline]
pub fn is_authorized(state: &RegistryState, caller: &Identity) -> bool {
    is_admin(state, caller) || is_official(state, caller)
}

/// Gate for admin-only operations.
///
/// # Errors
///
/// Returns `NotAuthorized` if the caller is not the administrator.
pub fn require_admin(state: &RegistryState, caller: &Identity) -> Result<()> {
    if is_admin(state, caller) {
        Ok(())
    } else {
        Err(RegistryError::NotAuthorized { caller: caller.clone() })
    }
}

/// Gate for operations requiring admin or official authority.
///
/// # Errors
///
/// Returns `NotAuthorized` if the caller holds neither role.
pub fn require_authorized(state: &RegistryState, caller: &Identity) -> Result<()> {
    if is_authorized(state, caller) {
        Ok(())
    } else {
        Err(RegistryError::NotAuthorized { caller: caller.clone() })
    }
}
