//! Lenient field decoders for host payloads.
//!
//! The host is trusted but loosely typed: fields may be missing, `null`, or
//! carry a number where a string is expected. Every decoder maps such input
//! to a neutral value instead of rejecting the whole message.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value<'de, D: Deserializer<'de>>(d: D) -> Result<Value, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.unwrap_or(Value::Null))
}

/// Strings; `null` becomes `""`, numbers and booleans are stringified.
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match value(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Booleans; numbers are truthy when non-zero, everything else is `false`.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match value(d)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}

pub fn number_of(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// Non-negative integer counts; negative or unparsable values become `0`.
pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(number_of(&value(d)?)
        .map(|f| f.round().clamp(0.0, u32::MAX as f64) as u32)
        .unwrap_or(0))
}

/// Percentages clamped to `[0, 100]`.
pub fn percent<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(clamp_percent(number_of(&value(d)?).unwrap_or(0.0)))
}

/// Optional float (e.g. a heading); absent or non-numeric stays `None`.
pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(number_of(&value(d)?))
}

/// Optional flag; only an explicit boolean or number is `Some`.
pub fn opt_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match value(d)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    })
}

pub fn clamp_percent(p: f64) -> f64 {
    if p.is_finite() { p.clamp(0.0, 100.0) } else { 0.0 }
}
