extern crate alloc;

use alloc::format;
use alloc::string::String as StdString;

use common::{hashing, response, LedgerError};
use serde::Serialize;
use soroban_sdk::{contracttype, BytesN, Env, String};

/// Method segment of every DID this registry mints.
pub const DID_METHOD: &str = "medinet";

/// Errors that can occur while parsing a DID string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DidFormatError {
    /// DID string does not start with "did:".
    MissingPrefix,
    /// DID is missing the method component (second segment).
    MissingMethod,
    /// DID is missing the method-specific identifier (third segment).
    MissingIdentifier,
    /// A component contains characters outside its allowed set.
    InvalidCharacters,
}

impl From<DidFormatError> for LedgerError {
    fn from(_: DidFormatError) -> Self {
        LedgerError::InvalidInput
    }
}

/// Validate `did:<method>:<method_specific_id>`.
///
/// The method is lowercase alphanumeric; the identifier may also contain
/// `.`, `-`, `_`, `:` and `%`.
pub fn validate_did_format(did: &str) -> Result<(), DidFormatError> {
    let rest = did.strip_prefix("did:").ok_or(DidFormatError::MissingPrefix)?;
    let (method, id) = rest.split_once(':').ok_or(DidFormatError::MissingMethod)?;

    if method.is_empty() {
        return Err(DidFormatError::MissingMethod);
    }
    if id.is_empty() {
        return Err(DidFormatError::MissingIdentifier);
    }

    let valid_method = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if !method.chars().all(valid_method) {
        return Err(DidFormatError::InvalidCharacters);
    }

    let valid_id =
        |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':' | '%');
    if !id.chars().all(valid_id) {
        return Err(DidFormatError::InvalidCharacters);
    }

    Ok(())
}

/// Fresh identifier carrying 128 random bits from the ledger PRNG.
pub fn generate_id(env: &Env) -> StdString {
    let raw: BytesN<16> = env.prng().gen();
    format!("did:{}:{}", DID_METHOD, hex::encode(raw.to_array()))
}

/// A DID record as persisted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Did {
    pub id: String,
    pub owner: String,
    /// Uncompressed SEC1 P-256 point, hex.
    pub public_key: String,
    pub attributes: String,
    pub commitment_hash: String,
    pub created_at: u64,
    pub updated_at: u64,
    pub revoked: bool,
}

/// Result of DID creation. `secret_key` is the hex private scalar; the
/// registry keeps only the public half. The scalar comes from the ledger
/// PRNG and is part of the transaction result, so anyone reading the ledger
/// can recover it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DidIssuance {
    pub did: Did,
    pub secret_key: String,
}

#[derive(Serialize)]
pub(crate) struct DidDocument {
    id: StdString,
    owner: StdString,
    #[serde(rename = "publicKey")]
    public_key: StdString,
    attributes: StdString,
    #[serde(rename = "commitmentHash")]
    commitment_hash: StdString,
    #[serde(rename = "createdAt")]
    created_at: u64,
    #[serde(rename = "updatedAt")]
    updated_at: u64,
    revoked: bool,
}

impl Did {
    /// Commitment over `owner ‖ public_key ‖ attributes`.
    pub fn compute_commitment(
        env: &Env,
        owner: &str,
        public_key: &str,
        attributes: &str,
    ) -> StdString {
        hashing::commitment_hash(env, &[owner, public_key, attributes])
    }

    pub fn recommit(&mut self, env: &Env) {
        let commitment = Self::compute_commitment(
            env,
            &hashing::to_std(&self.owner),
            &hashing::to_std(&self.public_key),
            &hashing::to_std(&self.attributes),
        );
        self.commitment_hash = hashing::to_host(env, &commitment);
    }

    /// True when the stored commitment still matches the fingerprinted fields.
    pub fn is_consistent(&self, env: &Env) -> bool {
        let expected = Self::compute_commitment(
            env,
            &hashing::to_std(&self.owner),
            &hashing::to_std(&self.public_key),
            &hashing::to_std(&self.attributes),
        );
        hashing::to_std(&self.commitment_hash) == expected
    }

    pub(crate) fn document(&self) -> DidDocument {
        DidDocument {
            id: hashing::to_std(&self.id),
            owner: hashing::to_std(&self.owner),
            public_key: hashing::to_std(&self.public_key),
            attributes: hashing::to_std(&self.attributes),
            commitment_hash: hashing::to_std(&self.commitment_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
            revoked: self.revoked,
        }
    }

    pub fn to_json(&self) -> Result<StdString, LedgerError> {
        response::to_json(&self.document())
    }
}

#[derive(Serialize)]
struct IssuanceDocument {
    did: DidDocument,
    #[serde(rename = "secretKey")]
    secret_key: StdString,
}

impl DidIssuance {
    pub fn to_json(&self) -> Result<StdString, LedgerError> {
        response::to_json(&IssuanceDocument {
            did: self.did.document(),
            secret_key: hashing::to_std(&self.secret_key),
        })
    }
}
