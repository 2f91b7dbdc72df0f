#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

//! Token ledger.
//!
//! Per-user balances in fixed-point minor units. Rewards mint, transfers move
//! value between two distinct accounts, and every balance change recomputes
//! the account commitment. Each reward and transfer is posted to the
//! settlement bridge before anything is written.

extern crate alloc;

pub mod amount;
pub mod events;
pub mod ledger;
pub mod settlement;


use alloc::format;
use alloc::string::String as StdString;

use common::{config, hashing, response, CallerContext, LedgerError, Response, Role};
use ledger::{BalanceDocument, TokenBalance};
use serde::Serialize;
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, String, Symbol, Vec,
};

/// Function names reachable through [`PaymentContract::invoke`].
pub const FUNCTIONS: [&str; 5] = [
    "initializeToken",
    "rewardPatient",
    "rewardDoctor",
    "getBalance",
    "transferTokens",
];

const PATIENT_REWARD_ROLES: [Role; 2] = [Role::Admin, Role::Doctor];
const DOCTOR_REWARD_ROLES: [Role; 1] = [Role::Admin];

/// Both sides of a completed transfer, after the move.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferReceipt {
    pub from: TokenBalance,
    pub to: TokenBalance,
}

#[derive(Serialize)]
struct ReceiptDocument {
    from: BalanceDocument,
    to: BalanceDocument,
}

impl TransferReceipt {
    pub fn to_json(&self) -> Result<StdString, LedgerError> {
        response::to_json(&ReceiptDocument {
            from: self.from.document(),
            to: self.to.document(),
        })
    }
}

#[contract]
pub struct PaymentContract;

#[contractimpl]
impl PaymentContract {
    pub fn initialize(
        env: Env,
        admin: Address,
        attribute_authority: Address,
        settlement_bridge: Address,
    ) -> Result<(), LedgerError> {
        config::initialize(&env, &admin, &attribute_authority)?;
        settlement::set_bridge(&env, &settlement_bridge);
        Ok(())
    }

    pub fn set_attribute_authority(
        env: Env,
        caller: Address,
        authority: Address,
    ) -> Result<(), LedgerError> {
        caller.require_auth();
        config::set_attribute_authority(&env, &caller, &authority)
    }

    /// Point the ledger at a different settlement bridge. Admin only.
    pub fn set_settlement_bridge(
        env: Env,
        caller: Address,
        bridge: Address,
    ) -> Result<(), LedgerError> {
        caller.require_auth();
        if config::admin(&env)? != caller {
            return Err(LedgerError::Unauthorized);
        }
        settlement::set_bridge(&env, &bridge);
        Ok(())
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    /// Open or reset an account. Any existing balance is overwritten and the
    /// total supply moves by the difference.
    pub fn initialize_token(
        env: Env,
        caller: Address,
        user_id: String,
        initial_balance: i128,
    ) -> Result<TokenBalance, LedgerError> {
        config::require_initialized(&env)?;
        let ctx = CallerContext::establish(&env, caller);
        Self::open_account(&env, &ctx, &user_id, initial_balance)
    }

    /// Mint `amount` to a patient account. Admins and doctors only.
    pub fn reward_patient(
        env: Env,
        caller: Address,
        user_id: String,
        amount: i128,
        reason: String,
    ) -> Result<TokenBalance, LedgerError> {
        config::require_initialized(&env)?;
        let ctx = CallerContext::establish(&env, caller);
        Self::reward(
            &env,
            &ctx,
            &PATIENT_REWARD_ROLES,
            symbol_short!("RWD_PAT"),
            &user_id,
            amount,
            &reason,
        )
    }

    /// Mint `amount` to a doctor account. Admins only.
    pub fn reward_doctor(
        env: Env,
        caller: Address,
        user_id: String,
        amount: i128,
        reason: String,
    ) -> Result<TokenBalance, LedgerError> {
        config::require_initialized(&env)?;
        let ctx = CallerContext::establish(&env, caller);
        Self::reward(
            &env,
            &ctx,
            &DOCTOR_REWARD_ROLES,
            symbol_short!("RWD_DOC"),
            &user_id,
            amount,
            &reason,
        )
    }

    /// Move `amount` from one account to another.
    pub fn transfer_tokens(
        env: Env,
        caller: Address,
        from_id: String,
        to_id: String,
        amount: i128,
    ) -> Result<TransferReceipt, LedgerError> {
        config::require_initialized(&env)?;
        let ctx = CallerContext::establish(&env, caller);
        Self::transfer(&env, &ctx, &from_id, &to_id, amount)
    }

    pub fn get_balance(env: Env, user_id: String) -> Result<TokenBalance, LedgerError> {
        ledger::load(&env, &user_id)
    }

    /// Sum of every account balance.
    pub fn total_supply(env: Env) -> i128 {
        ledger::total_supply(&env)
    }

    /// String-argument dispatch. Amounts are decimal text; business failures
    /// come back as a `STATUS_ERROR` response rather than a trap.
    pub fn invoke(env: Env, caller: Address, function: String, args: Vec<String>) -> Response {
        let ctx = CallerContext::establish(&env, caller);
        if let Err(err) = config::require_initialized(&env) {
            return response::fail(&env, ctx.role, "request", "", err);
        }
        let args = response::args_to_std(&args);

        match hashing::to_std(&function).as_str() {
            "initializeToken" => Self::invoke_initialize(&env, &ctx, &args),
            "rewardPatient" => Self::invoke_reward(
                &env,
                &ctx,
                &args,
                &PATIENT_REWARD_ROLES,
                symbol_short!("RWD_PAT"),
            ),
            "rewardDoctor" => Self::invoke_reward(
                &env,
                &ctx,
                &args,
                &DOCTOR_REWARD_ROLES,
                symbol_short!("RWD_DOC"),
            ),
            "getBalance" => Self::invoke_get(&env, &ctx, &args),
            "transferTokens" => Self::invoke_transfer(&env, &ctx, &args),
            _ => response::unknown_function(&env, &FUNCTIONS),
        }
    }
}

impl PaymentContract {
    fn open_account(
        env: &Env,
        ctx: &CallerContext,
        user_id: &String,
        initial_balance: i128,
    ) -> Result<TokenBalance, LedgerError> {
        if user_id.len() == 0 {
            return Err(LedgerError::InvalidInput);
        }
        if initial_balance < 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let previous = match ledger::load(env, user_id) {
            Ok(existing) => existing.balance,
            Err(_) => 0,
        };
        let delta = initial_balance
            .checked_sub(previous)
            .ok_or(LedgerError::InvalidAmount)?;
        let supply = ledger::supply_after(env, delta)?;

        let account = TokenBalance::open(env, user_id, initial_balance);
        ledger::save(env, &account);
        ledger::set_total_supply(env, supply);
        events::emit_account_initialized(env, user_id.clone(), initial_balance, ctx.caller.clone());

        Ok(account)
    }

    fn reward(
        env: &Env,
        ctx: &CallerContext,
        allowed: &[Role],
        action: Symbol,
        user_id: &String,
        amount: i128,
        reason: &String,
    ) -> Result<TokenBalance, LedgerError> {
        ctx.require_role(allowed)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let mut account = ledger::load(env, user_id)?;
        let balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;
        let supply = ledger::supply_after(env, amount)?;

        settlement::post_reward(env, user_id, amount)?;

        account.set_balance(env, balance);
        ledger::save(env, &account);
        ledger::set_total_supply(env, supply);
        events::emit_reward(
            env,
            action,
            user_id.clone(),
            amount,
            reason.clone(),
            ctx.caller.clone(),
        );

        Ok(account)
    }

    fn transfer(
        env: &Env,
        ctx: &CallerContext,
        from_id: &String,
        to_id: &String,
        amount: i128,
    ) -> Result<TransferReceipt, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if from_id == to_id {
            return Err(LedgerError::InvalidInput);
        }

        let mut from = ledger::load(env, from_id)?;
        let mut to = ledger::load(env, to_id)?;
        if from.balance < amount {
            return Err(LedgerError::InsufficientFunds);
        }
        let credited = to
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;

        settlement::post_transfer(env, from_id, to_id, amount)?;

        from.set_balance(env, from.balance - amount);
        to.set_balance(env, credited);
        ledger::save(env, &from);
        ledger::save(env, &to);
        events::emit_transfer(
            env,
            from_id.clone(),
            to_id.clone(),
            amount,
            ctx.caller.clone(),
        );

        Ok(TransferReceipt { from, to })
    }

    fn invoke_initialize(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 2).is_err() {
            return response::usage(env, "user ID and initial balance to initialize tokens");
        }
        let feature = "token initialization";
        let subject = format!("user {}", args[0]);
        let user_id = hashing::to_host(env, &args[0]);
        let result = amount::parse_amount(&args[1])
            .and_then(|initial| Self::open_account(env, ctx, &user_id, initial))
            .and_then(|account| account.to_json());
        match result {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => response::fail(env, ctx.role, feature, &subject, err),
        }
    }

    fn invoke_reward(
        env: &Env,
        ctx: &CallerContext,
        args: &[StdString],
        allowed: &[Role],
        action: Symbol,
    ) -> Response {
        let (feature, request, gate) = if allowed.contains(&Role::Doctor) {
            (
                "patient reward",
                "the patient ID, reward amount, and reason",
                "only admins or doctors can reward patients",
            )
        } else {
            (
                "doctor reward",
                "the doctor ID, reward amount, and reason",
                "only admins can reward doctors",
            )
        };
        if response::expect_args(args, 3).is_err() {
            return response::usage(env, request);
        }

        let subject = format!("user {}", args[0]);
        let user_id = hashing::to_host(env, &args[0]);
        let reason = hashing::to_host(env, &args[2]);
        let result = amount::parse_amount(&args[1])
            .and_then(|value| Self::reward(env, ctx, allowed, action, &user_id, value, &reason))
            .and_then(|account| account.to_json());
        match result {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(LedgerError::Unauthorized) => response::fail_with(
                env,
                &format!("Sorry, {}, {}.", ctx.role.title(), gate),
            ),
            Err(err) => response::fail(env, ctx.role, feature, &subject, err),
        }
    }

    fn invoke_get(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 1).is_err() {
            return response::usage(env, "a user ID to retrieve the balance");
        }
        let feature = "balance retrieval";
        let user_id = hashing::to_host(env, &args[0]);
        match ledger::load(env, &user_id).and_then(|account| account.to_json()) {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => response::fail(env, ctx.role, feature, &format!("user {}", args[0]), err),
        }
    }

    fn invoke_transfer(env: &Env, ctx: &CallerContext, args: &[StdString]) -> Response {
        if response::expect_args(args, 3).is_err() {
            return response::usage(env, "the sender ID, recipient ID, and amount to transfer");
        }
        let feature = "token transfer";
        let from_id = hashing::to_host(env, &args[0]);
        let to_id = hashing::to_host(env, &args[1]);
        let result = amount::parse_amount(&args[2])
            .and_then(|value| Self::transfer(env, ctx, &from_id, &to_id, value))
            .and_then(|receipt| receipt.to_json());

        match result {
            Ok(body) => response::ok(env, ctx.role, feature, Some(&body)),
            Err(err) => {
                let subject = match err {
                    LedgerError::NotFound if !ledger::exists(env, &from_id) => {
                        format!("sender {}", args[0])
                    }
                    LedgerError::NotFound => format!("recipient {}", args[1]),
                    _ => StdString::from(args[0].as_str()),
                };
                response::fail(env, ctx.role, feature, &subject, err)
            }
        }
    }
}
