extern crate alloc;

use alloc::string::String as StdString;

use common::{hashing, response, LedgerError, TTL_EXTEND_TO, TTL_THRESHOLD};
use serde::Serialize;
use soroban_sdk::{contracttype, Env, String};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Record(String),
    /// Consumed-nonce marker, keyed by the nonce string itself.
    Nonce(String),
    /// Nonces consumed so far in the given ledger sequence.
    WriteCount(u32),
}

/// A clinical record. `data_hash` is a digest of the off-ledger payload;
/// `nonce` is bound to the write that produced this version.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRecord {
    pub id: String,
    pub data_hash: String,
    pub created_at: u64,
    pub updated_at: u64,
    pub nonce: String,
}

#[derive(Serialize)]
struct RecordDocument {
    id: StdString,
    #[serde(rename = "dataHash")]
    data_hash: StdString,
    #[serde(rename = "createdAt")]
    created_at: u64,
    #[serde(rename = "updatedAt")]
    updated_at: u64,
    nonce: StdString,
}

impl PatientRecord {
    pub fn to_json(&self) -> Result<StdString, LedgerError> {
        response::to_json(&RecordDocument {
            id: hashing::to_std(&self.id),
            data_hash: hashing::to_std(&self.data_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
            nonce: hashing::to_std(&self.nonce),
        })
    }
}

pub fn exists(env: &Env, id: &String) -> bool {
    env.storage().persistent().has(&DataKey::Record(id.clone()))
}

pub fn load(env: &Env, id: &String) -> Result<PatientRecord, LedgerError> {
    env.storage()
        .persistent()
        .get(&DataKey::Record(id.clone()))
        .ok_or(LedgerError::NotFound)
}

pub fn save(env: &Env, record: &PatientRecord) {
    let key = DataKey::Record(record.id.clone());
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
