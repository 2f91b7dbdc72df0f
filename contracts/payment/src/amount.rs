//! Fixed-point token amounts.
//!
//! Balances are `i128` minor units with seven decimal places. Decimal text is
//! parsed exactly: an optional sign, digits, and at most seven fractional
//! digits. Anything else (exponents, `NaN`, `inf`, whitespace, excess
//! precision) is rejected rather than rounded.

extern crate alloc;

use alloc::format;
use alloc::string::String as StdString;

use common::LedgerError;

pub const DECIMALS: usize = 7;
/// Minor units per whole token.
pub const SCALE: i128 = 10_000_000;

/// Parse a decimal string into minor units.
pub fn parse_amount(text: &str) -> Result<i128, LedgerError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(LedgerError::InvalidAmount);
    }
    if fraction.len() > DECIMALS {
        return Err(LedgerError::InvalidAmount);
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(LedgerError::InvalidAmount);
    }

    let mut units: i128 = 0;
    for b in whole.bytes() {
        units = units
            .checked_mul(10)
            .and_then(|u| u.checked_add(i128::from(b - b'0')))
            .ok_or(LedgerError::InvalidAmount)?;
    }
    units = units.checked_mul(SCALE).ok_or(LedgerError::InvalidAmount)?;

    let mut frac_units: i128 = 0;
    for b in fraction.bytes() {
        frac_units = frac_units * 10 + i128::from(b - b'0');
    }
    for _ in fraction.len()..DECIMALS {
        frac_units *= 10;
    }
    units = units
        .checked_add(frac_units)
        .ok_or(LedgerError::InvalidAmount)?;

    Ok(if negative { -units } else { units })
}

/// Canonical rendering with all seven decimals, e.g. `15.0000000`.
pub fn format_amount(units: i128) -> StdString {
    let sign = if units < 0 { "-" } else { "" };
    let abs = units.unsigned_abs();
    let scale = SCALE.unsigned_abs();
    format!(
        "{}{}.{:0width$}",
        sign,
        abs / scale,
        abs % scale,
        width = DECIMALS
    )
}
