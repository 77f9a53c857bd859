//! Common helpers shared by the calculations and the report formatting.

use rust_decimal::{Decimal, RoundingStrategy};

use super::CalculationError;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly half a cent round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ltt_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(275.0001)), dec!(275.00));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Passes `price` through unchanged, or rejects it if it is negative.
pub fn ensure_non_negative(price: Decimal) -> Result<Decimal, CalculationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CalculationError::InvalidInput(price));
    }
    Ok(price)
}

/// Formats an amount as Canadian dollars with thousands separators,
/// e.g. `$1,234.56`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ltt_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency(dec!(8475)), "$8,475.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats an amount rounded to whole dollars, e.g. `$300`.
pub fn format_whole_dollars(value: Decimal) -> String {
    let whole = value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .trunc()
        .to_string();
    let sign = if value.is_sign_negative() && whole != "0" {
        "-"
    } else {
        ""
    };

    format!("{sign}${}", group_thousands(&whole))
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
