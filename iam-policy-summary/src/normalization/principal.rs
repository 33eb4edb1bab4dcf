//! Principal simplification.

use serde_json::Value;

use crate::model::PrincipalValue;
use crate::render::canonical_text;

/// Label prefix for principals that are not a plain string.
pub const COMPLEX_PRINCIPAL_PREFIX: &str = "complex principal: ";

impl From<Value> for PrincipalValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(s) => Self::Plain(s),
            other => Self::Structured(other),
        }
    }
}

/// Collapse a principal into one display string.
///
/// Structured principals are not decomposed; they are flagged as complex and
/// rendered canonically so the label stays inspectable.
pub fn simplify_principal(principal: &PrincipalValue) -> Option<String> {
    match principal {
        PrincipalValue::Absent => None,
        PrincipalValue::Plain(s) => Some(s.clone()),
        PrincipalValue::Structured(value) => Some(format!(
            "{COMPLEX_PRINCIPAL_PREFIX}{}",
            canonical_text(value)
        )),
    }
}
