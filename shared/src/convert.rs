//! Form-input coercion
//!
//! Converts raw text-field input into wire values. Numeric fields fall back
//! to zero and optional foreign keys to `None`; free-form user input is
//! never a hard error at this layer.

use rust_decimal::Decimal;

/// Parse a price/amount field. Empty, unparsable, or negative input
/// becomes zero.
pub fn decimal_or_zero(input: &str) -> Decimal {
    input
        .trim()
        .parse::<Decimal>()
        .unwrap_or_default()
        .max(Decimal::ZERO)
}

/// Parse a quantity field. Empty, unparsable, or negative input becomes
/// zero.
pub fn quantity_or_zero(input: &str) -> i64 {
    input.trim().parse::<i64>().unwrap_or(0).max(0)
}

/// Parse an optional foreign-key field. Empty and non-numeric input both
/// become `None`.
pub fn fk_or_null(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// True when the field carries something other than whitespace.
pub fn is_present(input: &str) -> bool {
    !input.trim().is_empty()
}
