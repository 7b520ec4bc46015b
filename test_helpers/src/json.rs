//! Raw mapping construction.

use serde_json::{Map, Value};

/// Unwrap a `json!({...})` literal into its mapping.
///
/// # Panics
///
/// Panics when `value` is not a JSON object; callers pass literals.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use test_helpers::object;
///
/// let raw = object(json!({"tag": "next"}));
/// assert_eq!(raw.len(), 1);
/// ```
#[must_use]
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object literal, got {other}"),
    }
}
