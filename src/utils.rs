use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

// Enough places for any uint256 amount
const MAX_DECIMALS: u32 = 77;
const MAX_DECIMAL_SCALE: usize = 28;

lazy_static! {
    static ref EVM_ADDRESS: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap();
}

// Validate EVM address (0x followed by 40 hex digits)
pub fn validate_evm_address(address: &str) -> bool {
    EVM_ADDRESS.is_match(address)
}

// Shorten address or hash for display: 0x1234...abcd
pub fn shorten_address(address: &str) -> String {
    const CHARS: usize = 4;

    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= CHARS * 2 + 2 + 3 {
        return address.to_string();
    }

    let start: String = chars[..CHARS + 2].iter().collect();
    let end: String = chars[chars.len() - CHARS..].iter().collect();

    format!("{}...{}", start, end)
}

/// Convert a human amount ("1.5") into base units ("1500000000000000000").
///
/// Rejects negative amounts and amounts with more fractional digits than `decimals`.
pub fn parse_units(amount: &str, decimals: u32) -> Result<String> {
    let mut amount = amount.trim();
    if amount.contains('.') {
        amount = amount.trim_end_matches('0').trim_end_matches('.');
    }

    // Decimal rounds past 28 places, so excess precision is caught on the text
    let fraction_digits = amount
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0);
    if fraction_digits > decimals as usize {
        return Err(anyhow!(
            "Amount has more than {} decimal places",
            decimals
        ));
    }
    if fraction_digits > MAX_DECIMAL_SCALE {
        return Err(anyhow!("Amount is too precise"));
    }

    let amount = Decimal::from_str(amount).map_err(|_| anyhow!("Invalid amount"))?;
    if amount < Decimal::ZERO {
        return Err(anyhow!("Invalid amount"));
    }

    let amount = amount.normalize();
    let scale = amount.scale();
    if scale > decimals {
        return Err(anyhow!(
            "Amount has more than {} decimal places",
            decimals
        ));
    }

    let mantissa = amount.mantissa().unsigned_abs();
    let base = 10u128
        .checked_pow(decimals - scale)
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(|| anyhow!("Amount is too large"))?;

    Ok(base.to_string())
}

/// Render a base-unit integer string with `decimals` places, trimming trailing zeros.
pub fn format_units(value: &str, decimals: u32) -> Result<String> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(anyhow!("Invalid base unit value: {}", value));
    }

    if decimals > MAX_DECIMALS {
        return Err(anyhow!("Unsupported decimals: {}", decimals));
    }

    let digits = value.trim_start_matches('0');
    let decimals = decimals as usize;
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        Ok(int_part.to_string())
    } else {
        Ok(format!("{}.{}", int_part, frac_part))
    }
}
