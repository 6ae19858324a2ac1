//! Recursive removal of sensitive fields from JSON trees.

use serde_json::{Map, Value};

/// Object keys that never leave the process, at any depth.
pub const SENSITIVE_KEYS: [&str; 5] = ["prompt", "input", "output", "error", "state"];

pub fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.contains(&key)
}

/// Rebuild `value` without any object entry whose key is sensitive.
///
/// Arrays are walked element by element so objects nested in lists are
/// cleaned too. Scalars pass through untouched.
pub fn redact(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(redact_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(redact).collect()),
        scalar => scalar,
    }
}

/// [`redact`] for an object body.
pub fn redact_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter(|(key, _)| !is_sensitive_key(key))
        .map(|(key, child)| (key, redact(child)))
        .collect()
}

/// True if any object in `value` carries a sensitive key.
pub fn contains_sensitive_key(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(key, child)| is_sensitive_key(key) || contains_sensitive_key(child)),
        Value::Array(items) => items.iter().any(contains_sensitive_key),
        _ => false,
    }
}
