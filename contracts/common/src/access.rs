//! # Caller role resolution
//!
//! A caller's role is an attribute asserted by an external attribute authority
//! contract. The authority is consulted once per invocation and the answer is
//! frozen into a [`CallerContext`], which every operation receives explicitly.
//!
//! ```text
//! resolve_attribute(caller, "role")
//!   ├─ Some("doctor") → Doctor
//!   ├─ Some("admin")  → Admin
//!   └─ anything else  → Patient   (absent, unknown value, call failure)
//! ```
//!
//! Resolution never fails: an unreachable authority degrades to the
//! least-privileged role.

use soroban_sdk::{contractclient, contracttype, symbol_short, Address, Env, String, Symbol};

use crate::{config, hashing, LedgerError};

/// Name of the attribute carrying the caller's role.
pub const ROLE_ATTRIBUTE: Symbol = symbol_short!("role");

/// Interface of the external attribute authority.
#[contractclient(name = "AttributeAuthorityClient")]
pub trait AttributeAuthority {
    fn resolve_attribute(env: Env, subject: Address, name: Symbol) -> Option<String>;
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    /// Map a raw attribute value onto a role.
    pub fn from_attribute(value: &str) -> Role {
        match value {
            "doctor" => Role::Doctor,
            "admin" => Role::Admin,
            _ => Role::Patient,
        }
    }

    /// Form of address used in outcome messages.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Doctor => "Doctor",
            Role::Admin => "Admin",
        }
    }
}

/// Resolve `caller`'s role through the configured attribute authority.
pub fn resolve_role(env: &Env, caller: &Address) -> Role {
    let Some(authority) = config::attribute_authority(env) else {
        return Role::Patient;
    };

    let client = AttributeAuthorityClient::new(env, &authority);
    match client.try_resolve_attribute(caller, &ROLE_ATTRIBUTE) {
        Ok(Ok(Some(value))) => Role::from_attribute(&hashing::to_std(&value)),
        _ => Role::Patient,
    }
}

/// The authenticated caller together with its role for this invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallerContext {
    pub caller: Address,
    pub role: Role,
}

impl CallerContext {
    /// Authenticate `caller` and resolve its role once.
    pub fn establish(env: &Env, caller: Address) -> Self {
        caller.require_auth();
        let role = resolve_role(env, &caller);
        CallerContext { caller, role }
    }

    /// Build a context with a known role.
    pub fn with_role(caller: Address, role: Role) -> Self {
        CallerContext { caller, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Succeed only when the caller holds one of `allowed`.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), LedgerError> {
        if allowed.contains(&self.role) {
            return Ok(());
        }
        Err(LedgerError::Unauthorized)
    }

    /// Ownership rule shared by DID mutation: the claimed owner must match
    /// the stored one unless the caller is an admin.
    pub fn require_owner_or_admin(
        &self,
        stored_owner: &str,
        claimed_owner: &str,
    ) -> Result<(), LedgerError> {
        if stored_owner == claimed_owner || self.is_admin() {
            return Ok(());
        }
        Err(LedgerError::Unauthorized)
    }
}
