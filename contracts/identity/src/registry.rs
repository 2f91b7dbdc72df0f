use common::{LedgerError, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, Env, String};

use crate::did::Did;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Did(String),
}

pub fn exists(env: &Env, id: &String) -> bool {
    env.storage().persistent().has(&DataKey::Did(id.clone()))
}

/// Load a DID, rejecting a record whose commitment no longer matches it.
pub fn load(env: &Env, id: &String) -> Result<Did, LedgerError> {
    let did: Did = env
        .storage()
        .persistent()
        .get(&DataKey::Did(id.clone()))
        .ok_or(LedgerError::NotFound)?;
    if !did.is_consistent(env) {
        return Err(LedgerError::Persistence);
    }
    Ok(did)
}

pub fn save(env: &Env, did: &Did) {
    let key = DataKey::Did(did.id.clone());
    env.storage().persistent().set(&key, did);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
