//! Number extraction from platform column values.
//!
//! The platform encodes numbers differently per column type: number columns
//! store a JSON object such as `{"value":"7"}` (or `{"number":7}` for some
//! formula/rating types), text columns store a JSON string, and the
//! human-readable `text` field is usually, but not always, populated. The
//! strategies below are tried in a fixed order and the first usable result
//! wins.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Longest numeric prefix accepted by a lenient float parse: optional sign,
/// then `Infinity` or a decimal literal with optional exponent.
static FLOAT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid regex")
});

/// Parse the leading number of `input`, ignoring leading whitespace and any
/// trailing garbage (`"42 units"` -> `42.0`).
///
/// Returns `None` when no numeric prefix exists. `NaN` is never returned.
pub fn parse_float(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let matched = FLOAT_PREFIX_RE.find(trimmed)?.as_str();

    let unsigned = matched.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return Some(if matched.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    matched.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Interpret a property of a JSON-wrapped column value.
fn parse_json_scalar(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        _ => None,
    }
}

/// Extract a number from a column's `text` and raw `value` fields.
///
/// Order of strategies:
///
/// 1. non-empty `text` parsed leniently;
/// 2. `value` parsed as JSON:
///    - object with a `value` property, else a `number` property;
///    - bare JSON number;
///    - JSON string parsed leniently;
/// 3. `value` that is not JSON at all, parsed leniently.
///
/// A JSON object that has a `value` property never falls through to
/// `number`, and valid JSON never falls through to strategy 3.
pub fn parse_column_number(text: Option<&str>, value: Option<&str>) -> Option<f64> {
    if let Some(n) = text.filter(|t| !t.is_empty()).and_then(parse_float) {
        return Some(n);
    }

    let raw = value.filter(|v| !v.is_empty())?;

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => {
            if let Some(inner) = map.get("value") {
                parse_json_scalar(inner)
            } else if let Some(inner) = map.get("number") {
                parse_json_scalar(inner)
            } else {
                None
            }
        }
        Ok(Value::Number(n)) => n.as_f64(),
        Ok(Value::String(s)) => parse_float(&s),
        Ok(_) => None,
        Err(_) => parse_float(raw),
    }
}
