//! P-256 key issuance and ECDSA verification.
//!
//! Keys are generated from the ledger PRNG and handled by the RustCrypto
//! `p256` implementation; no scalar arithmetic happens here. Signatures are
//! the fixed 64-byte `r ‖ s` encoding over the SHA-256 digest of the data.

extern crate alloc;

use alloc::string::String as StdString;

use common::{hashing, LedgerError};
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::PublicKey;
use soroban_sdk::{BytesN, Env};

/// Width of one signature component.
pub const SCALAR_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = SCALAR_LEN * 2;

// A random 32-byte string is a valid scalar except with negligible probability.
const KEYGEN_ATTEMPTS: u32 = 4;

/// Hex encodings of a freshly generated key pair.
pub struct KeyMaterial {
    pub public_key: StdString,
    pub secret_key: StdString,
}

pub fn generate_keypair(env: &Env) -> Result<KeyMaterial, LedgerError> {
    for _ in 0..KEYGEN_ATTEMPTS {
        let seed: BytesN<32> = env.prng().gen();
        if let Ok(signing_key) = SigningKey::from_slice(&seed.to_array()) {
            let public = PublicKey::from(signing_key.verifying_key());
            return Ok(KeyMaterial {
                public_key: hex::encode(public.to_encoded_point(false).as_bytes()),
                secret_key: hex::encode(signing_key.to_bytes()),
            });
        }
    }
    Err(LedgerError::KeyGeneration)
}

/// Check `signature_hex` over `data` against the hex SEC1 `public_key_hex`.
///
/// Malformed hex, or a signature that is not exactly 64 bytes, is an error.
/// A well-formed signature that does not verify is `Ok(false)`, including
/// one whose scalars are zero or out of range.
pub fn verify(
    env: &Env,
    public_key_hex: &str,
    data: &[u8],
    signature_hex: &str,
) -> Result<bool, LedgerError> {
    let key_bytes = hashing::decode_hex(public_key_hex).ok_or(LedgerError::MalformedPublicKey)?;
    let verifying_key =
        VerifyingKey::from_sec1_bytes(&key_bytes).map_err(|_| LedgerError::MalformedPublicKey)?;

    let sig_bytes = hashing::decode_hex(signature_hex).ok_or(LedgerError::MalformedHex)?;
    if sig_bytes.len() != SIGNATURE_LEN {
        return Err(LedgerError::MalformedSignature);
    }
    let Ok(signature) = Signature::from_slice(&sig_bytes) else {
        return Ok(false);
    };

    let digest = hashing::digest(env, data);
    Ok(verifying_key.verify_prehash(&digest, &signature).is_ok())
}
