//! Test doubles for the external collaborators.
//!
//! Both mocks are ordinary contracts so they can be registered in a test
//! `Env` and reached through the same cross-contract clients production uses.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, Address, Env, String, Symbol, Vec,
};

use crate::access::ROLE_ATTRIBUTE;

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Attribute(Address, Symbol),
    Unavailable,
    Failing,
    Rewards,
    Transfers,
}

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum MockError {
    Unavailable = 1,
    Rejected = 2,
}

// ── Attribute authority ──────────────────────────────────────────────────────

#[contract]
pub struct MockAttributeAuthority;

#[contractimpl]
impl MockAttributeAuthority {
    pub fn set_attribute(env: Env, subject: Address, name: Symbol, value: String) {
        env.storage()
            .instance()
            .set(&MockKey::Attribute(subject, name), &value);
    }

    pub fn set_role(env: Env, subject: Address, value: String) {
        Self::set_attribute(env, subject, ROLE_ATTRIBUTE, value);
    }

    /// While set, every lookup fails as an unreachable authority would.
    pub fn set_unavailable(env: Env, unavailable: bool) {
        env.storage().instance().set(&MockKey::Unavailable, &unavailable);
    }

    pub fn resolve_attribute(
        env: Env,
        subject: Address,
        name: Symbol,
    ) -> Result<Option<String>, MockError> {
        let unavailable: bool = env
            .storage()
            .instance()
            .get(&MockKey::Unavailable)
            .unwrap_or(false);
        if unavailable {
            return Err(MockError::Unavailable);
        }
        Ok(env
            .storage()
            .instance()
            .get(&MockKey::Attribute(subject, name)))
    }
}

// ── Settlement bridge ────────────────────────────────────────────────────────

/// Records every posting it accepts. While `failing` is set it rejects all
/// postings and records nothing.
#[contract]
pub struct MockSettlementBridge;

#[contractimpl]
impl MockSettlementBridge {
    pub fn set_failing(env: Env, failing: bool) {
        env.storage().instance().set(&MockKey::Failing, &failing);
    }

    pub fn post_reward(env: Env, user_id: String, amount: i128) -> Result<(), MockError> {
        Self::ensure_accepting(&env)?;
        let mut rewards = Self::rewards(env.clone());
        rewards.push_back((user_id, amount));
        env.storage().instance().set(&MockKey::Rewards, &rewards);
        Ok(())
    }

    pub fn post_transfer(
        env: Env,
        from_id: String,
        to_id: String,
        amount: i128,
    ) -> Result<(), MockError> {
        Self::ensure_accepting(&env)?;
        let mut transfers = Self::transfers(env.clone());
        transfers.push_back((from_id, to_id, amount));
        env.storage().instance().set(&MockKey::Transfers, &transfers);
        Ok(())
    }

    pub fn rewards(env: Env) -> Vec<(String, i128)> {
        env.storage()
            .instance()
            .get(&MockKey::Rewards)
            .unwrap_or(Vec::new(&env))
    }

    pub fn transfers(env: Env) -> Vec<(String, String, i128)> {
        env.storage()
            .instance()
            .get(&MockKey::Transfers)
            .unwrap_or(Vec::new(&env))
    }

    pub fn reward_count(env: Env) -> u32 {
        Self::rewards(env).len()
    }

    pub fn transfer_count(env: Env) -> u32 {
        Self::transfers(env).len()
    }
}

impl MockSettlementBridge {
    fn ensure_accepting(env: &Env) -> Result<(), MockError> {
        let failing: bool = env
            .storage()
            .instance()
            .get(&MockKey::Failing)
            .unwrap_or(false);
        if failing {
            return Err(MockError::Rejected);
        }
        Ok(())
    }
}
