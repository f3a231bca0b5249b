//! Lenient conversions from loosely-typed JSON values.
//!
//! Admin payloads and hand-edited data files carry numbers as strings,
//! strings as numbers, and missing fields as `null`. These helpers turn such
//! values into text and numbers without failing.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Text form of a scalar value.
///
/// Strings pass through, numbers and `true` are printed. `null`, `false`,
/// arrays and objects have no text form.
#[must_use]
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        Value::Null | Value::Bool(false) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Trimmed text form of a value, `None` if empty after trimming.
#[must_use]
pub fn trimmed_text(value: &Value) -> Option<String> {
    text(value)
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Numeric form of a value.
///
/// Numbers pass through, numeric strings are parsed (surrounding whitespace
/// allowed), `true` is one. Anything else, including strings that don't
/// parse, yields `None`.
#[must_use]
pub fn number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        Value::Bool(true) => Some(Decimal::ONE),
        Value::Null | Value::Bool(false) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
