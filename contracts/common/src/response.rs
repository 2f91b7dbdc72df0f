//! Response envelope for the string-based `invoke` entry points.
//!
//! `invoke(caller, function, args)` never traps on a business failure: it
//! returns a [`Response`] whose `status` tells success from failure and whose
//! `message` carries the role-flavoured text, followed on success by a newline
//! and the JSON form of the affected entity when there is one.

extern crate alloc;

use alloc::format;
use alloc::string::String as StdString;
use alloc::vec::Vec as StdVec;

use serde::Serialize;
use soroban_sdk::{contracttype, Env, String, Vec};

use crate::{hashing, messages, LedgerError, Role};

pub const STATUS_OK: u32 = 200;
pub const STATUS_ERROR: u32 = 500;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub status: u32,
    pub message: String,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Successful response, with the serialized entity appended when present.
pub fn ok(env: &Env, role: Role, feature: &str, payload: Option<&str>) -> Response {
    let text = match payload {
        Some(body) => format!("{}\n{}", messages::success(role, feature), body),
        None => messages::success(role, feature),
    };
    Response {
        status: STATUS_OK,
        message: hashing::to_host(env, &text),
    }
}

/// Successful response with a caller-built message line.
pub fn ok_with(env: &Env, message: &str, payload: Option<&str>) -> Response {
    let text = match payload {
        Some(body) => format!("{}\n{}", message, body),
        None => StdString::from(message),
    };
    Response {
        status: STATUS_OK,
        message: hashing::to_host(env, &text),
    }
}

pub fn fail(env: &Env, role: Role, feature: &str, subject: &str, err: LedgerError) -> Response {
    fail_with(env, &messages::describe_error(role, feature, subject, err))
}

/// Failure with a caller-built message.
pub fn fail_with(env: &Env, message: &str) -> Response {
    Response {
        status: STATUS_ERROR,
        message: hashing::to_host(env, message),
    }
}

/// Arity failure. `request` names the expected arguments and the action,
/// e.g. `"a DID ID to retrieve"`.
pub fn usage(env: &Env, request: &str) -> Response {
    fail_with(env, &format!("Please provide {}. Thank you!", request))
}

pub fn unknown_function(env: &Env, supported: &[&str]) -> Response {
    let text = format!(
        "Invalid function name. Please provide a valid function ({}). Thank you!",
        supported.join(", ")
    );
    fail_with(env, &text)
}

/// Convert the positional host-string arguments of an `invoke` call.
pub fn args_to_std(args: &Vec<String>) -> StdVec<StdString> {
    args.iter().map(|arg| hashing::to_std(&arg)).collect()
}

/// Argument count is checked before anything else is parsed.
pub fn expect_args(args: &[StdString], count: usize) -> Result<(), LedgerError> {
    if args.len() != count {
        return Err(LedgerError::InvalidArgumentCount);
    }
    Ok(())
}

/// JSON form of an entity view.
pub fn to_json<T: Serialize>(value: &T) -> Result<StdString, LedgerError> {
    serde_json::to_string(value).map_err(|_| LedgerError::Persistence)
}
