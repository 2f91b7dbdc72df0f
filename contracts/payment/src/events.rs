//! Events published by the token ledger.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

// ── Event payloads ───────────────────────────────────────────────────────────

/// Fired when an account is opened or reset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountInitializedEvent {
    pub user_id: String,
    pub balance: i128,
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when tokens are minted to an account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardEvent {
    pub user_id: String,
    pub amount: i128,
    pub reason: String,
    pub caller: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from_id: String,
    pub to_id: String,
    pub amount: i128,
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when the settlement bridge refuses a posting.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementFailedEvent {
    pub kind: Symbol,
    pub user_id: String,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ───────────────────────────────────────────────────────────────

pub fn emit_account_initialized(env: &Env, user_id: String, balance: i128, caller: Address) {
    env.events().publish(
        (symbol_short!("TOKEN"), symbol_short!("INIT")),
        AccountInitializedEvent {
            user_id,
            balance,
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_reward(
    env: &Env,
    action: Symbol,
    user_id: String,
    amount: i128,
    reason: String,
    caller: Address,
) {
    env.events().publish(
        (symbol_short!("TOKEN"), action),
        RewardEvent {
            user_id,
            amount,
            reason,
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_transfer(env: &Env, from_id: String, to_id: String, amount: i128, caller: Address) {
    env.events().publish(
        (symbol_short!("TOKEN"), symbol_short!("TRANSFER")),
        TransferEvent {
            from_id,
            to_id,
            amount,
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_settlement_failed(env: &Env, kind: Symbol, user_id: String, amount: i128) {
    env.events().publish(
        (symbol_short!("SETTLE"), symbol_short!("FAILED")),
        SettlementFailedEvent {
            kind,
            user_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
