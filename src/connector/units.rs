//! Decimal <-> base unit conversion for the native currency.

use alloy_primitives::utils::{self, ParseUnits};
use alloy_primitives::U256;

use crate::error::{DappError, DappResult};

/// BNB, like ether, has 18 decimals.
pub const ETHER_DECIMALS: u8 = 18;

/// Parse a non-negative decimal string into base units.
///
/// Form input is checked for shape first, so signs, exponents, hex and
/// digits past `decimals` are refused rather than truncated.
pub fn parse_units(amount: &str, decimals: u8) -> DappResult<U256> {
    let amount = amount.trim();
    let (int_part, frac_part) = amount.split_once('.').unwrap_or((amount, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(DappError::InvalidAmount(format!("'{}' is not a number", amount)));
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(DappError::InvalidAmount(format!(
            "'{}' is not a decimal amount",
            amount
        )));
    }
    if frac_part.len() > decimals as usize {
        return Err(DappError::InvalidAmount(format!(
            "'{}' has more than {} decimal places",
            amount, decimals
        )));
    }

    let normalized = format!(
        "{}.{}",
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part }
    );
    match utils::parse_units(&normalized, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(DappError::InvalidAmount(format!(
            "'{}' is negative",
            amount
        ))),
        Err(e) => Err(DappError::InvalidAmount(format!("'{}': {}", amount, e))),
    }
}

pub fn parse_ether(amount: &str) -> DappResult<U256> {
    parse_units(amount, ETHER_DECIMALS)
}

/// Render wei as a trimmed BNB amount.
pub fn format_ether(value: U256) -> String {
    trim_fraction(utils::format_ether(value))
}

fn trim_fraction(formatted: String) -> String {
    if !formatted.contains('.') {
        return formatted;
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
