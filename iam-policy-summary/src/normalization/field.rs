//! Action/Resource field normalization.

use serde_json::Value;

use crate::model::FieldValue;
use crate::render::canonical_text;

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(s) => Self::Single(s),
            Value::Array(items) => Self::Many(items.iter().map(canonical_text).collect()),
            other => Self::Single(canonical_text(&other)),
        }
    }
}

/// Reduce a field to an ordered list of strings.
///
/// Absent yields an empty list; a single value yields a one-element list; a
/// list keeps its length and order.
pub fn normalize_field(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::Absent => Vec::new(),
        FieldValue::Single(s) => vec![s.clone()],
        FieldValue::Many(items) => items.clone(),
    }
}
