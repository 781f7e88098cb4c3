//! PHP currency handling: parsing user-typed amounts and display formatting.
//!
//! Cart arithmetic is exact (`Decimal`, no intermediate rounding); rounding to
//! centavos happens only here, when a value is rendered for display.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a money amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

impl ParseAmountError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Rounds a value to exactly two decimal places using half-up rounding.
///
/// Standard financial rounding: values at exactly 0.005 round away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use cart_core::currency::round_half_up;
///
/// assert_eq!(round_half_up(dec!(20.004)), dec!(20.00));
/// assert_eq!(round_half_up(dec!(20.005)), dec!(20.01));
/// assert_eq!(round_half_up(dec!(-20.005)), dec!(-20.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Normalizes typed input: trims whitespace, drops a leading peso sign and
/// comma thousands separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim().trim_start_matches('₱').replace(',', "")
}

/// Parses a user-typed string into a [`Decimal`] amount.
///
/// Accepts comma thousands separators (`"1,234.56"`) and an optional leading
/// `₱`. Empty or whitespace-only input is an error; so is anything with
/// trailing garbage (`"12.5abc"` does not parse as `12.5`).
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    normalize_amount_input(s)
        .parse()
        .map_err(|e| ParseAmountError {
            input: s.to_string(),
            source: e,
        })
}

/// Formats an amount as PHP currency: `₱` sign, comma-grouped whole part,
/// exactly two decimal places, half-up rounded.
///
/// ```
/// use rust_decimal_macros::dec;
/// use cart_core::currency::format_php;
///
/// assert_eq!(format_php(dec!(75.5)), "₱75.50");
/// assert_eq!(format_php(dec!(1234567.891)), "₱1,234,567.89");
/// ```
pub fn format_php(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = match plain.split_once('.') {
        Some(parts) => parts,
        None => (plain.as_str(), "00"),
    };
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}₱{}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
