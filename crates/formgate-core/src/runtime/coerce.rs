// crates/formgate-core/src/runtime/coerce.rs
// ============================================================================
// Module: FormGate Value Coercion
// Description: Loose-typing helpers shared by operators and rule checks.
// Purpose: Define truthiness, numeric/string coercion, length, and equality.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Field values are loosely typed: the same field may hold a string on one
//! render and a number on another. Operators and rule checks therefore work
//! through a small set of coercions with fixed semantics:
//!
//! - `None` is an unset value and is distinct from JSON `null`.
//! - Falsy values: unset, `null`, `false`, `0`, and `""`.
//! - Numeric coercion trims strings, maps `""`/`null` to `0`, booleans to
//!   `0`/`1`, and anything unparseable to `NaN`.
//! - Strict equality never coerces and never equates composite values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;

use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Truthiness and Length
// ============================================================================

/// Returns true when the value is truthy.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Returns the length of length-bearing values.
///
/// Strings count UTF-16 code units; arrays count elements. Other values have
/// no length.
#[must_use]
pub fn length_of(value: Option<&Value>) -> Option<usize> {
    match value {
        Some(Value::String(text)) => Some(text.encode_utf16().count()),
        Some(Value::Array(items)) => Some(items.len()),
        _ => None,
    }
}

/// Returns true when the value is a string that is empty after trimming.
#[must_use]
pub fn is_blank_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(text)) if trim_whitespace(text).is_empty())
}

// ============================================================================
// SECTION: Equality
// ============================================================================

/// Strict equality without coercion.
///
/// Numbers compare numerically regardless of their integer/float encoding.
/// Arrays and objects are never equal to anything, including themselves,
/// because the context value and the comparand never share identity.
#[must_use]
#[allow(clippy::float_cmp, reason = "Strict numeric equality is the defined semantics.")]
pub fn strict_equals(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) | (Some(Value::Null), Some(Value::Null)) => true,
        (Some(Value::Bool(left)), Some(Value::Bool(right))) => left == right,
        (Some(Value::Number(left)), Some(Value::Number(right))) => {
            match (left.as_f64(), right.as_f64()) {
                (Some(left), Some(right)) => left == right,
                _ => false,
            }
        }
        (Some(Value::String(left)), Some(Value::String(right))) => left == right,
        _ => false,
    }
}

// ============================================================================
// SECTION: String Coercion
// ============================================================================

/// Converts a value to its loose string form.
#[must_use]
pub fn to_display_string(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None => Cow::Borrowed("undefined"),
        Some(Value::Null) => Cow::Borrowed("null"),
        Some(Value::Bool(flag)) => Cow::Borrowed(if *flag { "true" } else { "false" }),
        Some(Value::Number(number)) => Cow::Owned(number_to_string(number)),
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        Some(Value::Array(items)) => {
            let parts: Vec<Cow<'_, str>> = items
                .iter()
                .map(|item| match item {
                    Value::Null => Cow::Borrowed(""),
                    other => to_display_string(Some(other)),
                })
                .collect();
            Cow::Owned(parts.join(","))
        }
        Some(Value::Object(_)) => Cow::Borrowed("[object Object]"),
    }
}

/// Formats a JSON number in its shortest round-trip form.
fn number_to_string(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        return value.to_string();
    }
    if let Some(value) = number.as_u64() {
        return value.to_string();
    }
    number.as_f64().map_or_else(|| number.to_string(), format_number)
}

/// Formats a float using exponent notation outside `[1e-6, 1e21)`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if (1e-6 .. 1e21).contains(&magnitude) {
        return format!("{value}");
    }
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

// ============================================================================
// SECTION: Numeric Coercion
// ============================================================================

/// Coerces a value to a number; unrepresentable values yield `NaN`.
#[must_use]
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Object(_)) => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(flag)) => f64::from(u8::from(*flag)),
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(text)) => parse_number(text),
        Some(array @ Value::Array(_)) => parse_number(&to_display_string(Some(array))),
    }
}

/// Parses numeric text; empty or whitespace-only text is zero.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let trimmed = trim_whitespace(text);
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }
    if is_decimal_literal(trimmed) { trimmed.parse::<f64>().unwrap_or(f64::NAN) } else { f64::NAN }
}

/// Parses `0x`, `0o`, and `0b` prefixed literals.
///
/// Returns `None` when no prefix is present and `NaN` for malformed digits.
fn parse_radix_literal(text: &str) -> Option<f64> {
    let (radix, digits) = if let Some(digits) = strip_prefix_ci(text, 'x') {
        (16, digits)
    } else if let Some(digits) = strip_prefix_ci(text, 'o') {
        (8, digits)
    } else if let Some(digits) = strip_prefix_ci(text, 'b') {
        (2, digits)
    } else {
        return None;
    };
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let mut acc = 0.0_f64;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            return Some(f64::NAN);
        };
        acc = acc.mul_add(f64::from(radix), f64::from(digit));
    }
    Some(acc)
}

/// Strips a `0<marker>` prefix in either letter case.
fn strip_prefix_ci(text: &str, marker: char) -> Option<&str> {
    let rest = text.strip_prefix('0')?;
    rest.strip_prefix(marker).or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))
}

/// Checks `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx += 1;
    }
    let int_start = idx;
    while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
        idx += 1;
    }
    let mut mantissa_digits = idx - int_start;
    if bytes.get(idx) == Some(&b'.') {
        idx += 1;
        let frac_start = idx;
        while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
            idx += 1;
        }
        mantissa_digits += idx - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        idx += 1;
        if matches!(bytes.get(idx), Some(b'+' | b'-')) {
            idx += 1;
        }
        let exp_start = idx;
        while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
            idx += 1;
        }
        if idx == exp_start {
            return false;
        }
    }
    idx == bytes.len()
}

/// Trims whitespace including the byte-order mark.
#[must_use]
pub fn trim_whitespace(text: &str) -> &str {
    text.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}')
}
