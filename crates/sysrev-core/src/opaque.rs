//! Opaque serialization of structured JSON values.
//!
//! The local store only holds scalar columns. Structured values (objects,
//! arrays) are stored as their compact JSON text.

use serde_json::Value;

/// Serialize any non-null value to its compact JSON text.
///
/// Used for fields whose shape varies by label type (`answer`), where even
/// scalars are stored encoded so every row reads back the same way.
#[must_use]
pub fn encode(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Like [`encode`] but keeps the result as a JSON value (`null` or a string).
#[must_use]
pub fn encode_value(value: &Value) -> Value {
    encode(value).map_or(Value::Null, Value::String)
}

/// Keep scalars as they are and encode objects and arrays.
#[must_use]
pub fn scalarize(value: Value) -> Value {
    match value {
        Value::Object(_) | Value::Array(_) => Value::String(value.to_string()),
        scalar => scalar,
    }
}
