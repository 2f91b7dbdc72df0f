//! Single-use write nonces.
//!
//! Every successful create or update consumes exactly one nonce and leaves a
//! one-byte marker under `DataKey::Nonce(nonce)`. The check-then-mark below
//! is not atomic on its own: two transactions that both observe "absent"
//! both write the marker key, and the host's footprint validation lets only
//! one of them commit.

extern crate alloc;

use alloc::format;
use alloc::string::String as StdString;

use common::{LedgerError, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{BytesN, Env, String};

use crate::events;
use crate::record::DataKey;

/// Sentinel byte stored under a consumed nonce.
pub const MARKER: [u8; 1] = [1];

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Write counters only need to outlive the ledger they count.
const COUNTER_TTL: u32 = 16;

/// `nonce-<id>-<nanoseconds>`.
///
/// Ledger time only ticks in whole seconds, so the sub-second part is this
/// ledger's write count. Writes within one ledger close get distinct nonces;
/// a later ledger whose clock has rolled back restarts the count at zero and
/// reproduces an earlier nonce.
pub fn derive(env: &Env, id: &str) -> StdString {
    let nanos = u128::from(env.ledger().timestamp()) * NANOS_PER_SECOND
        + u128::from(writes_this_ledger(env));
    format!("nonce-{}-{}", id, nanos)
}

pub fn is_consumed(env: &Env, nonce: &String) -> bool {
    env.storage().persistent().has(&DataKey::Nonce(nonce.clone()))
}

/// Mark `nonce` as consumed, failing if it already was.
pub fn consume(env: &Env, nonce: &String) -> Result<(), LedgerError> {
    if is_consumed(env, nonce) {
        events::emit_replay_rejected(env, nonce.clone());
        return Err(LedgerError::NonceReplayed);
    }

    let key = DataKey::Nonce(nonce.clone());
    env.storage()
        .persistent()
        .set(&key, &BytesN::from_array(env, &MARKER));
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    count_write(env)
}

fn writes_this_ledger(env: &Env) -> u32 {
    env.storage()
        .temporary()
        .get(&DataKey::WriteCount(env.ledger().sequence()))
        .unwrap_or(0)
}

fn count_write(env: &Env) -> Result<(), LedgerError> {
    let key = DataKey::WriteCount(env.ledger().sequence());
    let next = writes_this_ledger(env)
        .checked_add(1)
        .ok_or(LedgerError::Persistence)?;
    env.storage().temporary().set(&key, &next);
    env.storage()
        .temporary()
        .extend_ttl(&key, COUNTER_TTL, COUNTER_TTL);
    Ok(())
}
