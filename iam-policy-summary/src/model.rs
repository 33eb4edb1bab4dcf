//! Policy document model.
//!
//! The polymorphic `Action`, `Resource` and `Principal` members are decoded once,
//! at deserialization time, into explicit variants. Nothing downstream inspects
//! raw JSON for these fields.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::render::canonical_text;

/// A parsed IAM policy document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,

    /// Statements in authoring order.
    #[serde(rename = "Statement")]
    pub statements: Vec<Statement>,
}

/// One rule of a policy document.
///
/// Members other than the six below (`Id`, `NotAction`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Statement {
    /// Numbers and booleans are kept in their textual form.
    #[serde(rename = "Sid", default, deserialize_with = "scalar_text")]
    pub sid: Option<String>,

    /// Passed through verbatim. A missing or null `Effect` reads as the empty string.
    #[serde(rename = "Effect", default, deserialize_with = "scalar_text_or_empty")]
    pub effect: String,

    #[serde(rename = "Principal", default)]
    pub principal: PrincipalValue,

    #[serde(rename = "Action", default)]
    pub action: FieldValue,

    #[serde(rename = "Resource", default)]
    pub resource: FieldValue,

    /// Only presence is observed; the block itself is never interpreted.
    #[serde(rename = "Condition", default)]
    pub condition: Option<Value>,
}

/// An `Action` or `Resource` member: absent, one string, or a list.
///
/// List elements are held in their canonical textual rendering, see
/// [`crate::render::canonical_text`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Absent,
    Single(String),
    Many(Vec<String>),
}

/// A `Principal` member: absent, a plain string (`"*"` or an ARN), or a
/// structured reference such as `{"AWS": "..."}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PrincipalValue {
    #[default]
    Absent,
    Plain(String),
    Structured(Value),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(FieldValue::from)
    }
}

impl<'de> Deserialize<'de> for PrincipalValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(PrincipalValue::from)
    }
}

/// Read a scalar member as text. Null reads as `None`; objects and arrays are
/// rejected.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Array(_) => Err(de::Error::invalid_type(Unexpected::Seq, &"a string")),
        Value::Object(_) => Err(de::Error::invalid_type(Unexpected::Map, &"a string")),
        scalar => Ok(Some(canonical_text(&scalar))),
    }
}

fn scalar_text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(deserializer).map(Option::unwrap_or_default)
}
