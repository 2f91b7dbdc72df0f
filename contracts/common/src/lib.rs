//! Shared primitives for the MediNet contract suite.
//!
//! This crate provides:
//! - [`LedgerError`]: standardised error codes for all three contracts, each
//!   mapped onto an [`ErrorKind`].
//! - [`access`]: caller role resolution through the external attribute
//!   authority and the per-invocation [`access::CallerContext`].
//! - [`hashing`]: commitment hashes and string conversion helpers.
//! - [`messages`]: role-flavoured outcome texts.
//! - [`response`]: the `invoke` response envelope and argument checks.
//! - [`config`]: one-shot contract configuration held in instance storage.

#![no_std]
#![allow(clippy::arithmetic_side_effects)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

extern crate alloc;

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod access;
pub mod config;
pub mod hashing;
pub mod messages;
pub mod response;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use access::{CallerContext, Role};
pub use response::{Response, STATUS_ERROR, STATUS_OK};

/// Persistent entry TTL bump applied on every write.
pub const TTL_THRESHOLD: u32 = 5_184_000;
pub const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by every MediNet contract.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authorisation                  |
/// | 20 – 29 | Entity not found               |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Replay protection              |
/// | 50 – 59 | Funds                          |
/// | 60 – 69 | Key material                   |
/// | 70 – 79 | Decoding                       |
/// | 80 – 89 | Stored state integrity         |
/// | 90 – 99 | Settlement bridge              |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum LedgerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    NotFound = 20,
    /// Wrong number of positional arguments for an `invoke` function.
    InvalidArgumentCount = 30,
    InvalidInput = 31,
    /// Amount is not a decimal number, has excess precision, or is out of range.
    InvalidAmount = 32,
    RecordExists = 33,
    UnknownFunction = 34,
    /// The nonce marker already exists.
    NonceReplayed = 40,
    InsufficientFunds = 50,
    KeyGeneration = 60,
    MalformedPublicKey = 61,
    MalformedHex = 70,
    MalformedSignature = 71,
    /// A stored entity no longer matches its own commitment, or could not be
    /// serialized.
    Persistence = 80,
    SettlementSync = 90,
}

/// Coarse failure classes used for reporting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Lifecycle,
    Validation,
    NotFound,
    Authorization,
    Replay,
    InsufficientFunds,
    Crypto,
    Decoding,
    Persistence,
    SettlementSync,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NotInitialized | LedgerError::AlreadyInitialized => ErrorKind::Lifecycle,
            LedgerError::Unauthorized => ErrorKind::Authorization,
            LedgerError::NotFound => ErrorKind::NotFound,
            LedgerError::InvalidArgumentCount
            | LedgerError::InvalidInput
            | LedgerError::InvalidAmount
            | LedgerError::RecordExists
            | LedgerError::UnknownFunction => ErrorKind::Validation,
            LedgerError::NonceReplayed => ErrorKind::Replay,
            LedgerError::InsufficientFunds => ErrorKind::InsufficientFunds,
            LedgerError::KeyGeneration | LedgerError::MalformedPublicKey => ErrorKind::Crypto,
            LedgerError::MalformedHex | LedgerError::MalformedSignature => ErrorKind::Decoding,
            LedgerError::Persistence => ErrorKind::Persistence,
            LedgerError::SettlementSync => ErrorKind::SettlementSync,
        }
    }
}
