//! Commitment hashes and string conversion helpers.
//!
//! A commitment is the SHA-256 of the plain concatenation of an entity's
//! fingerprinted fields, rendered as 64 lowercase hex characters. Fields are
//! joined without separators; this matches the fingerprint format already
//! present in stored ledger state.

extern crate alloc;

use alloc::string::String as StdString;
use alloc::vec;
use alloc::vec::Vec as StdVec;

use soroban_sdk::{Bytes, Env, String};

/// Hex SHA-256 commitment over `parts[0] ‖ parts[1] ‖ …`.
pub fn commitment_hash(env: &Env, parts: &[&str]) -> StdString {
    let mut payload = Bytes::new(env);
    for part in parts {
        payload.extend_from_slice(part.as_bytes());
    }
    let digest = env.crypto().sha256(&payload).to_array();
    hex::encode(digest)
}

/// Raw SHA-256 digest of `data`.
pub fn digest(env: &Env, data: &[u8]) -> [u8; 32] {
    env.crypto().sha256(&Bytes::from_slice(env, data)).to_array()
}

/// Copy a host string into an owned `alloc` string. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn to_std(value: &String) -> StdString {
    let mut buf = vec![0u8; value.len() as usize];
    value.copy_into_slice(&mut buf);
    match StdString::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => StdString::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

pub fn to_host(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

/// Decode a hex string, tolerating upper-case digits.
pub fn decode_hex(value: &str) -> Option<StdVec<u8>> {
    hex::decode(value).ok()
}
