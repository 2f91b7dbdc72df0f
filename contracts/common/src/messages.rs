//! Role-flavoured outcome messages.
//!
//! Every response speaks to the caller in the voice of their role. The text is
//! informational only; callers must branch on [`crate::Response::status`].

extern crate alloc;

use alloc::format;
use alloc::string::String as StdString;

use crate::{LedgerError, Role};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Message for a `(role, outcome)` pair about `feature`.
pub fn role_message(role: Role, outcome: Outcome, feature: &str) -> StdString {
    match (role, outcome) {
        (Role::Admin, Outcome::Success) => format!(
            "Thank you, Admin! Your action on {} has been completed successfully.",
            feature
        ),
        (Role::Admin, Outcome::Failure) => format!(
            "Sorry, Admin, we couldn't process your {} request. Please try again or contact support.",
            feature
        ),
        (Role::Doctor, Outcome::Success) => {
            format!("Great job, Doctor! Your update to {} was successful.", feature)
        }
        (Role::Doctor, Outcome::Failure) => format!(
            "Oops, Doctor, we encountered an issue with your {}. Please try again later or reach out to support.",
            feature
        ),
        (Role::Patient, Outcome::Success) => format!(
            "Thank you, Patient! Your {} has been updated successfully.",
            feature
        ),
        (Role::Patient, Outcome::Failure) => format!(
            "Sorry, Patient, we couldn't complete your {} request. Please try again or contact our support team.",
            feature
        ),
    }
}

pub fn success(role: Role, feature: &str) -> StdString {
    role_message(role, Outcome::Success, feature)
}

pub fn failure(role: Role, feature: &str) -> StdString {
    role_message(role, Outcome::Failure, feature)
}

/// Failure text for `err`. `subject` names the entity the failure concerns,
/// e.g. `"DID did:medinet:…"` or `"user p1"`.
pub fn describe_error(role: Role, feature: &str, subject: &str, err: LedgerError) -> StdString {
    let who = role.title();
    match err {
        LedgerError::NotFound => format!(
            "Sorry, {}, the {} does not exist. Please verify the ID and try again or contact support.",
            who, subject
        ),
        LedgerError::Unauthorized => format!(
            "Sorry, {}, you don't have permission for {} on {}. Please log in as the owner or with the correct role, or contact support.",
            who, feature, subject
        ),
        LedgerError::InvalidAmount => format!(
            "Sorry, {}, the amount you entered isn't valid. Please use a decimal value with at most 7 fractional digits and try again or contact support.",
            who
        ),
        LedgerError::InvalidInput => format!(
            "Sorry, {}, the input for your {} request is not valid. Please check the values and try again.",
            who, feature
        ),
        LedgerError::RecordExists => format!(
            "Sorry, {}, the {} already exists. Please use an update instead.",
            who, subject
        ),
        LedgerError::NonceReplayed => format!(
            "Sorry, {}, replay attack detected: this {} request reuses a nonce that was already consumed.",
            who, feature
        ),
        LedgerError::InsufficientFunds => format!(
            "Sorry, {}, insufficient balance for transfer from {}. Please check the balance and try again or contact support.",
            who, subject
        ),
        LedgerError::MalformedHex | LedgerError::MalformedSignature => format!(
            "Sorry, {}, the signature for {} could not be decoded. Please supply 64 bytes of hex (r then s) and try again.",
            who, subject
        ),
        LedgerError::SettlementSync => failure(role, "settlement sync"),
        LedgerError::NotInitialized => format!(
            "Sorry, {}, this service has not been configured yet. Please contact support.",
            who
        ),
        _ => failure(role, feature),
    }
}
