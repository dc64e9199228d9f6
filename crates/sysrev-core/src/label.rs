//! Label value types and the transform applied before label submission.
//!
//! The server expects booleans for `boolean` labels and a list of strings
//! for `categorical` and `string` labels. [`transform_label`] accepts the
//! looser shapes callers tend to have on hand and rejects everything else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::LabelError;

/// Declared value type of a project label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelType {
    Boolean,
    Categorical,
    String,
}

impl LabelType {
    /// Return the string representation used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Categorical => "categorical",
            Self::String => "string",
        }
    }

    /// Normalize a raw value into the canonical form for this type.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::InvalidValue`] when `value` does not match the
    /// shapes accepted for this type.
    pub fn transform(self, value: &Value) -> Result<LabelValue, LabelError> {
        match self {
            Self::Boolean => boolean_value(value).map(LabelValue::Boolean),
            Self::Categorical | Self::String => string_values(self, value).map(LabelValue::Strings),
        }
    }
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelType {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(Self::Boolean),
            "categorical" => Ok(Self::Categorical),
            "string" => Ok(Self::String),
            other => Err(LabelError::UnsupportedLabelType(other.to_string())),
        }
    }
}

/// A label value in the canonical form the server accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    Boolean(bool),
    Strings(Vec<String>),
}

/// Normalize `value` according to the declared `label_type`.
///
/// # Errors
///
/// Returns [`LabelError::UnsupportedLabelType`] for an unknown type and
/// [`LabelError::InvalidValue`] when the value shape does not fit the type.
pub fn transform_label(label_type: &str, value: &Value) -> Result<LabelValue, LabelError> {
    label_type.parse::<LabelType>()?.transform(value)
}

fn boolean_value(value: &Value) -> Result<bool, LabelError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.eq_ignore_ascii_case("yes") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("no") => Ok(false),
        other => Err(LabelError::InvalidValue {
            label_type: LabelType::Boolean.to_string(),
            reason: format!("expected a boolean or \"yes\"/\"no\", got {other}"),
        }),
    }
}

fn string_values(label_type: LabelType, value: &Value) -> Result<Vec<String>, LabelError> {
    let invalid = |reason: String| LabelError::InvalidValue {
        label_type: label_type.to_string(),
        reason,
    };

    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(invalid(format!("list element {other} is not a string"))),
            })
            .collect(),
        other => Err(invalid(format!(
            "expected a string or a list of strings, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!("yes"), true)]
    #[case(json!("No"), false)]
    #[case(json!("YES"), true)]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    fn boolean_accepts_native_and_yes_no(#[case] raw: Value, #[case] expected: bool) {
        assert_eq!(
            transform_label("boolean", &raw).unwrap(),
            LabelValue::Boolean(expected)
        );
    }

    #[rstest]
    #[case(json!("maybe"))]
    #[case(json!(1))]
    #[case(json!(null))]
    #[case(json!(["yes"]))]
    fn boolean_rejects_other_shapes(#[case] raw: Value) {
        let err = transform_label("boolean", &raw).unwrap_err();
        assert!(matches!(err, LabelError::InvalidValue { .. }), "{err}");
    }

    #[test]
    fn string_is_wrapped_in_list() {
        assert_eq!(
            transform_label("string", &json!("x")).unwrap(),
            LabelValue::Strings(vec!["x".to_string()])
        );
    }

    #[test]
    fn categorical_list_passes_through_in_order() {
        assert_eq!(
            transform_label("categorical", &json!(["b", "a"])).unwrap(),
            LabelValue::Strings(vec!["b".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn categorical_list_with_non_string_is_rejected() {
        let err = transform_label("categorical", &json!(["a", 1])).unwrap_err();
        assert!(matches!(err, LabelError::InvalidValue { .. }));
    }

    #[test]
    fn string_rejects_object() {
        let err = transform_label("string", &json!({"a": 1})).unwrap_err();
        assert!(matches!(err, LabelError::InvalidValue { .. }));
    }

    #[test]
    fn unknown_type_is_unsupported() {
        let err = transform_label("numeric", &json!(3)).unwrap_err();
        assert_eq!(err, LabelError::UnsupportedLabelType("numeric".to_string()));
    }

    #[test]
    fn label_value_serializes_to_wire_shape() {
        assert_eq!(serde_json::to_value(LabelValue::Boolean(true)).unwrap(), json!(true));
        assert_eq!(
            serde_json::to_value(LabelValue::Strings(vec!["a".into()])).unwrap(),
            json!(["a"])
        );
    }
}
