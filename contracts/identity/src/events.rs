//! Events published by the identity registry.
//!
//! Every successful DID mutation publishes under `("DID", <action>)` so
//! indexers can follow the lifecycle of an identifier. Key material never
//! appears in an event.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

/// Fired when a DID is minted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DidCreatedEvent {
    pub id: String,
    pub owner: String,
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when a DID's attributes change or it is revoked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DidChangedEvent {
    pub id: String,
    pub caller: Address,
    pub commitment_hash: String,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignatureCheckedEvent {
    pub id: String,
    pub valid: bool,
    pub timestamp: u64,
}

pub fn emit_did_created(env: &Env, id: String, owner: String, caller: Address) {
    env.events().publish(
        (symbol_short!("DID"), symbol_short!("CREATED")),
        DidCreatedEvent {
            id,
            owner,
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_did_updated(env: &Env, id: String, caller: Address, commitment_hash: String) {
    env.events().publish(
        (symbol_short!("DID"), symbol_short!("UPDATED")),
        DidChangedEvent {
            id,
            caller,
            commitment_hash,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_did_revoked(env: &Env, id: String, caller: Address, commitment_hash: String) {
    env.events().publish(
        (symbol_short!("DID"), symbol_short!("REVOKED")),
        DidChangedEvent {
            id,
            caller,
            commitment_hash,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_signature_checked(env: &Env, id: String, valid: bool) {
    env.events().publish(
        (symbol_short!("DID"), symbol_short!("SIG_CHK")),
        SignatureCheckedEvent {
            id,
            valid,
            timestamp: env.ledger().timestamp(),
        },
    );
}
