use num_bigint::BigUint;
use num_format::{Locale, ToFormattedString};

use dsd_types::TOKEN_DECIMALS;

use crate::error::StatsError;

/// 10^18, the fixed-point scale of every on-chain amount.
pub fn token_scale() -> BigUint {
    BigUint::from(10u32).pow(TOKEN_DECIMALS)
}

/// Parses an 18-decimal fixed-point integer string.
/// Only plain ascii digits are accepted: no sign, no decimal point, no spaces.
pub fn parse_amount(field: &str, raw: &str) -> Result<BigUint, StatsError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StatsError::parse(field, raw));
    }
    BigUint::parse_bytes(raw.as_bytes(), 10).ok_or_else(|| StatsError::parse(field, raw))
}

/// Converts an LP-token amount into DSD using the snapshot's `dsdPerUniV2` rate.
/// Exact integer arithmetic, the result is floored.
pub fn convert_lp_to_dsd(staged: &BigUint, dsd_per_uni_v2: &BigUint) -> BigUint {
    staged * dsd_per_uni_v2 / token_scale()
}

/// Decimal value of a fixed-point amount, for display only.
pub fn to_display(amount: &BigUint) -> f64 {
    to_decimal_string(amount).parse().unwrap_or(f64::MAX)
}

/// Exact decimal rendering of a fixed-point amount: `1500000000000000000` -> `"1.500000000000000000"`.
pub fn to_decimal_string(amount: &BigUint) -> String {
    let decimals = TOKEN_DECIMALS as usize;
    let digits = format!("{:0>width$}", amount.to_string(), width = decimals + 1);
    let (int_part, frac_part) = digits.split_at(digits.len() - decimals);
    format!("{int_part}.{frac_part}")
}

/// Thousands-separated, 2 decimals: `1234567.891` -> `"1,234,567.89"`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = int_part.parse::<u128>().map_or_else(
        |_| int_part.to_string(),
        |int| int.to_formatted_string(&Locale::en),
    );

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}
