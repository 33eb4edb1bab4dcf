//! Ingestion paths: a raw policy document, or one wrapped in an upload envelope.

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::json::JsonProvider;

/// Envelope carrying a policy document as an embedded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Upload envelope carrying a policy document as JSON text")]
pub struct PolicyUploadRequest {
    #[schemars(description = "The policy document, as JSON text")]
    pub policy_json: String,

    #[schemars(description = "Free-text name for the policy; not used by analysis")]
    #[serde(default)]
    pub policy_name: Option<String>,
}

/// How caller-supplied text should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Envelope if the top level has a string `policyJson` member, raw otherwise.
    #[default]
    Auto,
    Raw,
    Wrapped,
}

/// Caller-supplied policy text, resolved to one of the two ingestion paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyInput {
    Raw(String),
    Wrapped(PolicyUploadRequest),
}

impl PolicyInput {
    /// Resolve `text` according to `format`.
    ///
    /// Only an explicitly wrapped input can fail here; raw text is validated
    /// later, by analysis.
    pub fn from_text(text: &str, format: InputFormat) -> Result<Self> {
        match format {
            InputFormat::Raw => Ok(Self::Raw(text.to_string())),
            InputFormat::Wrapped => Self::wrapped(text),
            InputFormat::Auto => Ok(Self::detect(text)),
        }
    }

    /// Parse `text` as an upload envelope.
    pub fn wrapped(text: &str) -> Result<Self> {
        let value = JsonProvider::parse_to_value(text)?;
        let request: PolicyUploadRequest = JsonProvider::from_value(value)?;
        Ok(Self::Wrapped(request))
    }

    /// Pick the ingestion path from the shape of `text`.
    pub fn detect(text: &str) -> Self {
        let is_envelope = JsonProvider::parse_to_value(text)
            .ok()
            .as_ref()
            .and_then(Value::as_object)
            .is_some_and(|obj| {
                obj.get("policyJson").is_some_and(Value::is_string) && !obj.contains_key("Statement")
            });

        if is_envelope {
            // The shape was checked above; fall back to raw if decoding still fails.
            if let Ok(input) = Self::wrapped(text) {
                debug!("Detected wrapped policy upload");
                return input;
            }
        }
        Self::Raw(text.to_string())
    }

    /// The policy document text to analyze.
    pub fn policy_text(&self) -> &str {
        match self {
            Self::Raw(text) => text,
            Self::Wrapped(request) => &request.policy_json,
        }
    }

    pub fn policy_name(&self) -> Option<&str> {
        match self {
            Self::Raw(_) => None,
            Self::Wrapped(request) => request.policy_name.as_deref(),
        }
    }
}
