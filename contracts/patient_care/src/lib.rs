#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

//! Clinical record store.
//!
//! Records hold a digest of an off-ledger clinical payload. Every write is
//! bound to a freshly derived nonce and refused if that nonce was consumed
//! before. Records carry no ownership: any authenticated caller may write.

extern crate alloc;

pub mod events;
pub mod nonce;
pub mod record;
pub mod validation;


use alloc::format;
use alloc::string::String as StdString;

use common::{config, hashing, response, CallerContext, LedgerError, Response};
use record::PatientRecord;
use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

/// Function names reachable through [`PatientCareContract::invoke`].
pub const FUNCTIONS: [&str; 3] = ["createRecord", "updateRecord", "getRecord"];

#[contract]
pub struct PatientCareContract;

#[contractimpl]
impl PatientCareContract {
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

    /// Create a record. Creating an id that already exists is refused so the
    /// id and creation time stay immutable.
    pub fn create_record(
        env: Env,
        caller: Address,
        id: String,
        data_hash: String,
    ) -> Result<PatientRecord, LedgerError> {
        config::require_initialized(&env)?;
        let ctx = CallerContext::establish(&env, caller);
        Self::create(&env, &ctx, &id, &data_hash)
    }

    /// Replace the data hash of an existing record under a fresh nonce.
    pub fn update_record(
        env: Env,
        caller: Address,
        id: String,
        new_data_hash: String,
    ) -> Result<PatientRecord, LedgerError> {
        config::require_initialized(&env)?;
        let ctx = CallerContext::establish(&env, caller);
        Self::update(&env, &ctx, &id, &new_data_hash)
    }

    pub fn get_record(env: Env, id: String) -> Result<PatientRecord, LedgerError> {
        validation::validate_record_id(&id)?;
        record::load(&env, &id)
    }

    /// Whether `nonce` has already been consumed by a write.
    pub fn is_nonce_consumed(env: Env, nonce: String) -> bool {
        nonce::is_consumed(&env, &nonce)
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
            "createRecord" => Self::invoke_create(&env, &ctx, &args),
            "updateRecord" => Self::invoke_update(&env, &ctx, &args),
            "getRecord" => Self::invoke_get(&env, &ctx, &args),
            _ => response::unknown_function(&env, &FUNCTIONS),
        }
    }
}

impl PatientCareContract {
    fn create(
        env: &Env,
        ctx: &CallerContext,
        id: &String,
        data_hash: &String,
    ) -> Result<PatientRecord, LedgerError> {
        validation::validate_record_id(id)?;
        validation::validate_data_hash(data_hash)?;
        if record::exists(env, id) {
            return Err(LedgerError::RecordExists);
        }

        let nonce = hashing::to_host(env, &nonce::derive(env, &hashing::to_std(id)));
        nonce::consume(env, &nonce)?;

        let now = env.ledger().timestamp();
        let created = PatientRecord {
            id: id.clone(),
            data_hash: data_hash.clone(),
            created_at: now,
            updated_at: now,
            nonce: nonce.clone(),
        };
        record::save(env, &created);
        events::emit_record_created(env, id.clone(), nonce, ctx.caller.clone());

        Ok(created)
    }

    fn update(
        env: &Env,
        ctx: &CallerContext,
        id: &String,
        new_data_hash: &String,
    ) -> Result<PatientRecord, LedgerError> {
        validation::validate_record_id(id)?;
        validation::validate_data_hash(new_data_hash)?;
        // Existence first: a failed update must not burn a nonce.
        let mut current = record::load(env, id)?;

        let nonce = hashing::to_host(env, &nonce::derive(env, &hashing::to_std(id)));
        nonce::consume(env, &nonce)?;

        current.data_hash = new_data_hash.clone();
        current.updated_at = env.ledger().timestamp();
        current.nonce = nonce.clone();
        record::save(env, &current);
        events::emit_record_updated(env, id.clone(), nonce, ctx.caller.clone());

        Ok(current)
    }

    fn invoke_create(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 2).is_err() {
            return response::usage(env, "a record ID and data hash to create a record");
        }
        let feature = "record creation";
        let id = hashing::to_host(env, &args[0]);
        let data_hash = hashing::to_host(env, &args[1]);
        match Self::create(env, ctx, &id, &data_hash).and_then(|r| r.to_json()) {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => response::fail(env, ctx.role, feature, &format!("record {}", args[0]), err),
        }
    }

    fn invoke_update(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 2).is_err() {
            return response::usage(env, "a record ID and new data hash to update a record");
        }
        let feature = "record update";
        let id = hashing::to_host(env, &args[0]);
        let data_hash = hashing::to_host(env, &args[1]);
        match Self::update(env, ctx, &id, &data_hash).and_then(|r| r.to_json()) {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => response::fail(env, ctx.role, feature, &format!("record {}", args[0]), err),
        }
    }

    fn invoke_get(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 1).is_err() {
            return response::usage(env, "a record ID to retrieve");
        }
        let feature = "record retrieval";
        let id = hashing::to_host(env, &args[0]);
        let found = validation::validate_record_id(&id).and_then(|_| record::load(env, &id));
        match found.and_then(|r| r.to_json()) {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => response::fail(env, ctx.role, feature, &format!("record {}", args[0]), err),
        }
    }
}
