//! Off-ledger settlement bridge.
//!
//! The bridge is an external contract that mirrors rewards and transfers to
//! the settlement network. A posting is made after every check has passed
//! and before any balance is written, so a rejected posting leaves the
//! ledger untouched.

use common::LedgerError;
use soroban_sdk::{contractclient, symbol_short, Address, Env, String, Symbol};

use crate::events;

const SETTLE: Symbol = symbol_short!("SETTLE");

/// Interface of the settlement bridge contract. Amounts are minor units.
#[contractclient(name = "SettlementBridgeClient")]
pub trait SettlementBridge {
    fn post_reward(env: Env, user_id: String, amount: i128);
    fn post_transfer(env: Env, from_id: String, to_id: String, amount: i128);
}

pub fn set_bridge(env: &Env, bridge: &Address) {
    env.storage().instance().set(&SETTLE, bridge);
}

pub fn bridge(env: &Env) -> Result<Address, LedgerError> {
    env.storage()
        .instance()
        .get(&SETTLE)
        .ok_or(LedgerError::NotInitialized)
}

pub fn post_reward(env: &Env, user_id: &String, amount: i128) -> Result<(), LedgerError> {
    let client = SettlementBridgeClient::new(env, &bridge(env)?);
    match client.try_post_reward(user_id, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            events::emit_settlement_failed(env, symbol_short!("REWARD"), user_id.clone(), amount);
            Err(LedgerError::SettlementSync)
        }
    }
}

pub fn post_transfer(
    env: &Env,
    from_id: &String,
    to_id: &String,
    amount: i128,
) -> Result<(), LedgerError> {
    let client = SettlementBridgeClient::new(env, &bridge(env)?);
    match client.try_post_transfer(from_id, to_id, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            events::emit_settlement_failed(env, symbol_short!("TRANSFER"), from_id.clone(), amount);
            Err(LedgerError::SettlementSync)
        }
    }
}
