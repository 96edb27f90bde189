//! Argument extraction helpers for tool handlers.
//!
//! Tool arguments arrive as a loosely typed JSON object that the host has
//! already checked against the tool's `inputSchema`. These helpers only pull
//! values out; optional values that are absent, `null` or empty read as unset.

use serde::de::DeserializeOwned;
use serde_json::{from_value, Map, Value};

use crate::tools::DispatchError;

pub type Args = Map<String, Value>;

/// Extracts a required argument, failing only when it is absent or cannot be
/// read as `T`.
pub fn get_required_arg<T: DeserializeOwned>(args: &Args, key: &str) -> Result<T, DispatchError> {
    from_value(args.get(key).cloned().unwrap_or(Value::Null))
        .map_err(|_| DispatchError::InvalidArgument(key.to_string()))
}

/// Optional string argument. Numbers are accepted and rendered as text.
pub fn get_optional_str(args: &Args, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Optional non-negative integer. Integral floats such as `5.0` are accepted;
/// negative or fractional numbers and non-numeric values are rejected.
pub fn get_optional_u64(args: &Args, key: &str) -> Result<Option<u64>, DispatchError> {
    let invalid = || DispatchError::InvalidArgument(key.to_string());
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(v), _) => Ok(Some(v)),
            (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(Some(f as u64)),
            _ => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

/// Boolean flag, `false` unless the argument is literally `true`.
pub fn get_flag(args: &Args, key: &str) -> bool {
    args.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Boolean flag that is on unless explicitly `false`.
pub fn get_flag_default_on(args: &Args, key: &str) -> bool {
    args.get(key).and_then(Value::as_bool) != Some(false)
}

/// List of string-ish values. Non-string items are rendered as JSON text.
pub fn get_string_list(args: &Args, key: &str) -> Vec<String> {
    args.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(value_to_string).collect())
        .unwrap_or_default()
}

/// Helper function to convert any JSON value to its bare text form
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
