//! Events published by the clinical record store.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

/// Fired when a record version is written.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordWrittenEvent {
    pub id: String,
    pub nonce: String,
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when a write is refused because its nonce was already consumed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReplayRejectedEvent {
    pub nonce: String,
    pub timestamp: u64,
}

pub fn emit_record_created(env: &Env, id: String, nonce: String, caller: Address) {
    env.events().publish(
        (symbol_short!("RECORD"), symbol_short!("CREATED")),
        RecordWrittenEvent {
            id,
            nonce,
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_record_updated(env: &Env, id: String, nonce: String, caller: Address) {
    env.events().publish(
        (symbol_short!("RECORD"), symbol_short!("UPDATED")),
        RecordWrittenEvent {
            id,
            nonce,
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_replay_rejected(env: &Env, nonce: String) {
    env.events().publish(
        (symbol_short!("RECORD"), symbol_short!("REPLAY")),
        ReplayRejectedEvent {
            nonce,
            timestamp: env.ledger().timestamp(),
        },
    );
}
