use common::LedgerError;
use soroban_sdk::String;

const MIN_ID_LEN: u32 = 1;
const MAX_ID_LEN: u32 = 50;

const MIN_HASH_LEN: u32 = 1;
const MAX_HASH_LEN: u32 = 64;

/// Record ids are 1 to 50 bytes.
pub fn validate_record_id(id: &String) -> Result<(), LedgerError> {
    if !(MIN_ID_LEN..=MAX_ID_LEN).contains(&id.len()) {
        return Err(LedgerError::InvalidInput);
    }
    Ok(())
}

/// Data hashes are opaque digests of the off-ledger payload, 1 to 64 bytes.
pub fn validate_data_hash(hash: &String) -> Result<(), LedgerError> {
    if !(MIN_HASH_LEN..=MAX_HASH_LEN).contains(&hash.len()) {
        return Err(LedgerError::InvalidInput);
    }
    Ok(())
}
