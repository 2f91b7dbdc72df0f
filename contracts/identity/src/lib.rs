#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

extern crate alloc;

pub mod did;
pub mod events;
pub mod registry;
pub mod signature;


use alloc::format;
use alloc::string::String as StdString;
use alloc::vec::Vec as StdVec;

use common::{config, hashing, response, CallerContext, LedgerError, Response};
use did::{Did, DidIssuance};
use serde::Serialize;
use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, String, Vec};

/// Function names reachable through [`IdentityContract::invoke`].
pub const FUNCTIONS: [&str; 5] = [
    "createDID",
    "updateDID",
    "getDID",
    "revokeDID",
    "verifySignature",
];

#[derive(Serialize)]
struct Verification<'a> {
    id: &'a str,
    valid: bool,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct IdentityContract;

#[contractimpl]
impl IdentityContract {
    /// Configure the admin and the attribute authority used for role lookups.
    pub fn initialize(
        env: Env,
        admin: Address,
        attribute_authority: Address,
    ) -> Result<(), LedgerError> {
        config::initialize(&env, &admin, &attribute_authority)
    }

    pub fn set_attribute_authority(
        env: Env,
        caller: Address,
        authority: Address,
    ) -> Result<(), LedgerError> {
        caller.require_auth();
        config::set_attribute_authority(&env, &caller, &authority)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    /// Mint a DID with a freshly generated P-256 key pair.
    ///
    /// `public_key_hint` is accepted for call compatibility and ignored: the
    /// stored key is always the generated one.
    pub fn create_did(
        env: Env,
        caller: Address,
        owner: String,
        public_key_hint: String,
        attributes: String,
    ) -> Result<DidIssuance, LedgerError> {
        let _ = public_key_hint;
        let ctx = Self::context(&env, caller)?;
        Self::create(&env, &ctx, &hashing::to_std(&owner), &hashing::to_std(&attributes))
    }

    /// Replace a DID's attributes. The claimed owner must match the stored
    /// owner unless the caller is an admin.
    pub fn update_did(
        env: Env,
        caller: Address,
        id: String,
        new_attributes: String,
        claimed_owner: String,
    ) -> Result<Did, LedgerError> {
        let ctx = Self::context(&env, caller)?;
        Self::update(
            &env,
            &ctx,
            &hashing::to_std(&id),
            &hashing::to_std(&new_attributes),
            &hashing::to_std(&claimed_owner),
        )
    }

    /// Permanently revoke a DID. Revoking twice is a no-op.
    pub fn revoke_did(
        env: Env,
        caller: Address,
        id: String,
        claimed_owner: String,
    ) -> Result<Did, LedgerError> {
        let ctx = Self::context(&env, caller)?;
        Self::revoke(&env, &ctx, &hashing::to_std(&id), &hashing::to_std(&claimed_owner))
    }

    pub fn get_did(env: Env, id: String) -> Result<Did, LedgerError> {
        Self::fetch(&env, &hashing::to_std(&id))
    }

    /// Verify a hex `r ‖ s` signature over `data` with the DID's public key.
    pub fn verify_signature(
        env: Env,
        id: String,
        data: Bytes,
        signature_hex: String,
    ) -> Result<bool, LedgerError> {
        let data: StdVec<u8> = data.iter().collect();
        Self::check_signature(
            &env,
            &hashing::to_std(&id),
            &data,
            &hashing::to_std(&signature_hex),
        )
    }

    /// String-argument dispatch. Business failures come back as a
    /// `STATUS_ERROR` response rather than a trap.
    pub fn invoke(env: Env, caller: Address, function: String, args: Vec<String>) -> Response {
        let ctx = CallerContext::establish(&env, caller);
        if let Err(err) = config::require_initialized(&env) {
            return response::fail(&env, ctx.role, "request", "", err);
        }
        let args = response::args_to_std(&args);

        match hashing::to_std(&function).as_str() {
            "createDID" => Self::invoke_create(&env, &ctx, &args),
            "updateDID" => Self::invoke_update(&env, &ctx, &args),
            "getDID" => Self::invoke_get(&env, &ctx, &args),
            "revokeDID" => Self::invoke_revoke(&env, &ctx, &args),
            "verifySignature" => Self::invoke_verify(&env, &ctx, &args),
            _ => response::unknown_function(&env, &FUNCTIONS),
        }
    }
}

// ── Operations ───────────────────────────────────────────────────────────────

impl IdentityContract {
    fn context(env: &Env, caller: Address) -> Result<CallerContext, LedgerError> {
        config::require_initialized(env)?;
        Ok(CallerContext::establish(env, caller))
    }

    fn create(
        env: &Env,
        ctx: &CallerContext,
        owner: &str,
        attributes: &str,
    ) -> Result<DidIssuance, LedgerError> {
        if owner.is_empty() {
            return Err(LedgerError::InvalidInput);
        }

        let keys = signature::generate_keypair(env)?;
        let id = hashing::to_host(env, &did::generate_id(env));
        if registry::exists(env, &id) {
            return Err(LedgerError::RecordExists);
        }

        let now = env.ledger().timestamp();
        let commitment = Did::compute_commitment(env, owner, &keys.public_key, attributes);
        let record = Did {
            id: id.clone(),
            owner: hashing::to_host(env, owner),
            public_key: hashing::to_host(env, &keys.public_key),
            attributes: hashing::to_host(env, attributes),
            commitment_hash: hashing::to_host(env, &commitment),
            created_at: now,
            updated_at: now,
            revoked: false,
        };
        registry::save(env, &record);
        events::emit_did_created(env, id, record.owner.clone(), ctx.caller.clone());

        Ok(DidIssuance {
            did: record,
            secret_key: hashing::to_host(env, &keys.secret_key),
        })
    }

    fn update(
        env: &Env,
        ctx: &CallerContext,
        id: &str,
        new_attributes: &str,
        claimed_owner: &str,
    ) -> Result<Did, LedgerError> {
        let mut record = Self::fetch(env, id)?;
        ctx.require_owner_or_admin(&hashing::to_std(&record.owner), claimed_owner)?;

        record.attributes = hashing::to_host(env, new_attributes);
        record.recommit(env);
        record.updated_at = env.ledger().timestamp();
        registry::save(env, &record);
        events::emit_did_updated(
            env,
            record.id.clone(),
            ctx.caller.clone(),
            record.commitment_hash.clone(),
        );

        Ok(record)
    }

    fn revoke(
        env: &Env,
        ctx: &CallerContext,
        id: &str,
        claimed_owner: &str,
    ) -> Result<Did, LedgerError> {
        let mut record = Self::fetch(env, id)?;
        ctx.require_owner_or_admin(&hashing::to_std(&record.owner), claimed_owner)?;

        record.revoked = true;
        record.updated_at = env.ledger().timestamp();
        registry::save(env, &record);
        events::emit_did_revoked(
            env,
            record.id.clone(),
            ctx.caller.clone(),
            record.commitment_hash.clone(),
        );

        Ok(record)
    }

    /// Minted ids are always well formed, so a malformed id is simply absent.
    fn fetch(env: &Env, id: &str) -> Result<Did, LedgerError> {
        if did::validate_did_format(id).is_err() {
            return Err(LedgerError::NotFound);
        }
        registry::load(env, &hashing::to_host(env, id))
    }

    fn check_signature(
        env: &Env,
        id: &str,
        data: &[u8],
        signature_hex: &str,
    ) -> Result<bool, LedgerError> {
        let record = Self::fetch(env, id)?;
        let valid = signature::verify(
            env,
            &hashing::to_std(&record.public_key),
            data,
            signature_hex,
        )?;
        events::emit_signature_checked(env, record.id, valid);
        Ok(valid)
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

impl IdentityContract {
    fn invoke_create(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 3).is_err() {
            return response::usage(env, "owner, public key, and attributes to create a DID");
        }
        let feature = "DID creation";
        match Self::create(env, ctx, &args[0], &args[2]).and_then(|issued| issued.to_json()) {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => response::fail(env, ctx.role, feature, "DID", err),
        }
    }

    fn invoke_update(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 3).is_err() {
            return response::usage(env, "DID ID, new attributes, and owner to update a DID");
        }
        let feature = "DID update";
        match Self::update(env, ctx, &args[0], &args[1], &args[2]).and_then(|d| d.to_json()) {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => response::fail(env, ctx.role, feature, &format!("DID {}", args[0]), err),
        }
    }

    fn invoke_get(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 1).is_err() {
            return response::usage(env, "a DID ID to retrieve");
        }
        let feature = "DID retrieval";
        match Self::fetch(env, &args[0]).and_then(|d| d.to_json()) {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => response::fail(env, ctx.role, feature, &format!("DID {}", args[0]), err),
        }
    }

    fn invoke_revoke(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 2).is_err() {
            return response::usage(env, "a DID ID and owner to revoke a DID");
        }
        let feature = "DID revocation";
        match Self::revoke(env, ctx, &args[0], &args[1]).and_then(|d| d.to_json()) {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => response::fail(env, ctx.role, feature, &format!("DID {}", args[0]), err),
        }
    }

    fn invoke_verify(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 3).is_err() {
            return response::usage(env, "a DID ID, data, and signature to verify");
        }
        let feature = "signature verification";
        let subject = format!("DID {}", args[0]);
        let outcome = Self::check_signature(env, &args[0], args[1].as_bytes(), &args[2])
            .and_then(|valid| {
                let body = response::to_json(&Verification { id: &args[0], valid })?;
                Ok((valid, body))
            });
        match outcome {
            Ok((true, body)) => response::ok(env, ctx.role, feature, Some(&body)),
            Ok((false, body)) => response::ok_with(
                env,
                &format!(
                    "Sorry, {}, the signature is invalid for {}. Please verify the data and try again or contact support.",
                    ctx.role.title(),
                    subject
                ),
                Some(&body),
            ),
            Err(err) => response::fail(env, ctx.role, feature, &subject, err),
        }
    }
}
