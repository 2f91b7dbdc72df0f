//! One-shot contract configuration held in instance storage.
//!
//! Every MediNet contract is configured exactly once with an admin address and
//! the address of the attribute authority used for role resolution. The
//! payment contract additionally stores its settlement bridge under its own key.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::LedgerError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const ATTR_AUTHORITY: Symbol = symbol_short!("ATTR_AUTH");

/// Store the admin and attribute authority. Fails if already configured.
pub fn initialize(env: &Env, admin: &Address, authority: &Address) -> Result<(), LedgerError> {
    if env.storage().instance().has(&INITIALIZED) {
        return Err(LedgerError::AlreadyInitialized);
    }

    env.storage().instance().set(&ADMIN, admin);
    env.storage().instance().set(&ATTR_AUTHORITY, authority);
    env.storage().instance().set(&INITIALIZED, &true);

    Ok(())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn require_initialized(env: &Env) -> Result<(), LedgerError> {
    if !is_initialized(env) {
        return Err(LedgerError::NotInitialized);
    }
    Ok(())
}

pub fn admin(env: &Env) -> Result<Address, LedgerError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(LedgerError::NotInitialized)
}

/// Address of the attribute authority, if configured.
pub fn attribute_authority(env: &Env) -> Option<Address> {
    env.storage().instance().get(&ATTR_AUTHORITY)
}

/// Rotate the attribute authority. Only the configured admin may do this;
/// the caller must already have been authenticated.
pub fn set_attribute_authority(
    env: &Env,
    caller: &Address,
    authority: &Address,
) -> Result<(), LedgerError> {
    if admin(env)? != *caller {
        return Err(LedgerError::Unauthorized);
    }
    env.storage().instance().set(&ATTR_AUTHORITY, authority);
    Ok(())
}
