use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a price.
#[derive(Debug, Error)]
#[error("invalid price '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Error returned when a string is not a recognisable yes/no answer.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected yes or no, got '{0}'")]
pub struct ParseYesNoError(String);

/// Trims whitespace and removes a leading `$` and comma thousands separators.
fn normalize_price_input(s: &str) -> String {
    let trimmed = s.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest.trim_start()),
        None => ("", trimmed),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest).trim_start();
    format!("{sign}{}", rest.replace(',', ""))
}

/// Parses a price as typed by a user.
///
/// Accepts `$` and comma thousands separators (e.g. `"$1,234.56"`).
/// Empty or whitespace-only input is treated as 0, like an untouched
/// number field. Negative values parse; rejecting them is the
/// calculator's job.
pub fn parse_price(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_price_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid price: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a yes/no answer (`yes`, `y`, `true`, `1` and their negatives).
pub fn parse_yes_no(s: &str) -> Result<bool, ParseYesNoError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => Err(ParseYesNoError(s.trim().to_string())),
    }
}
