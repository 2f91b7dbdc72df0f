//! Token balance storage.
//!
//! One persistent entry per user plus a running total supply in instance
//! storage. Supply changes only through initialization and rewards; a
//! transfer moves value between two entries and leaves it untouched.

extern crate alloc;

use alloc::string::String as StdString;

use common::{hashing, response, LedgerError, TTL_EXTEND_TO, TTL_THRESHOLD};
use serde::Serialize;
use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol};

use crate::amount;

// ── Storage keys ──────────────────────────────────────────────────────────────

const SUPPLY: Symbol = symbol_short!("SUPPLY");

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Balance(String),
}

// ── Types ─────────────────────────────────────────────────────────────────────

/// A user's token account. `balance` is in minor units (see [`amount::SCALE`]).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenBalance {
    pub user_id: String,
    pub balance: i128,
    pub commitment_hash: String,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(Serialize)]
pub(crate) struct BalanceDocument {
    user_id: StdString,
    balance: StdString,
    #[serde(rename = "commitmentHash")]
    commitment_hash: StdString,
    #[serde(rename = "createdAt")]
    created_at: u64,
    #[serde(rename = "updatedAt")]
    updated_at: u64,
}

impl TokenBalance {
    pub fn open(env: &Env, user_id: &String, balance: i128) -> Self {
        let now = env.ledger().timestamp();
        let mut account = TokenBalance {
            user_id: user_id.clone(),
            balance,
            commitment_hash: String::from_str(env, ""),
            created_at: now,
            updated_at: now,
        };
        account.recommit(env);
        account
    }

    /// Commitment over `user_id ‖ canonical balance`.
    pub fn compute_commitment(env: &Env, user_id: &str, balance: i128) -> StdString {
        hashing::commitment_hash(env, &[user_id, &amount::format_amount(balance)])
    }

    /// Move to `balance`, stamping the update time and refreshing the commitment.
    pub fn set_balance(&mut self, env: &Env, balance: i128) {
        self.balance = balance;
        self.updated_at = env.ledger().timestamp();
        self.recommit(env);
    }

    fn recommit(&mut self, env: &Env) {
        let commitment =
            Self::compute_commitment(env, &hashing::to_std(&self.user_id), self.balance);
        self.commitment_hash = hashing::to_host(env, &commitment);
    }

    pub fn is_consistent(&self, env: &Env) -> bool {
        hashing::to_std(&self.commitment_hash)
            == Self::compute_commitment(env, &hashing::to_std(&self.user_id), self.balance)
    }

    pub(crate) fn document(&self) -> BalanceDocument {
        BalanceDocument {
            user_id: hashing::to_std(&self.user_id),
            balance: amount::format_amount(self.balance),
            commitment_hash: hashing::to_std(&self.commitment_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn to_json(&self) -> Result<StdString, LedgerError> {
        response::to_json(&self.document())
    }
}

// ── Storage helpers ───────────────────────────────────────────────────────────

pub fn exists(env: &Env, user_id: &String) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Balance(user_id.clone()))
}

pub fn load(env: &Env, user_id: &String) -> Result<TokenBalance, LedgerError> {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(user_id.clone()))
        .ok_or(LedgerError::NotFound)
}

pub fn save(env: &Env, account: &TokenBalance) {
    let key = DataKey::Balance(account.user_id.clone());
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&SUPPLY).unwrap_or(0)
}

/// Total supply after applying `delta`, without writing it.
pub fn supply_after(env: &Env, delta: i128) -> Result<i128, LedgerError> {
    total_supply(env)
        .checked_add(delta)
        .ok_or(LedgerError::InvalidAmount)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&SUPPLY, &supply);
}
