//! JSON provider built on `serde_json`.
//!
//! All JSON text entering or leaving the crate goes through here, so every
//! `serde_json` failure surfaces as a [`PolicySummaryError`] of the right kind.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{PolicySummaryError, Result};

/// Stateless JSON provider. `Send + Sync`; safe to use from any thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProvider;

impl JsonProvider {
    /// Parse text into a generic value. Malformed text is a `Parse` error.
    pub fn parse_to_value(json_str: &str) -> Result<Value> {
        serde_json::from_str(json_str).map_err(PolicySummaryError::from)
    }

    /// Decode a typed value out of an already-parsed tree. Shape mismatches are
    /// `Schema` errors.
    pub fn from_value<T>(value: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(value).map_err(|e| PolicySummaryError::schema(e.to_string()))
    }

    /// Serialize a value to compact JSON text.
    pub fn stringify<T>(value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        serde_json::to_string(value).map_err(PolicySummaryError::from)
    }

    /// Serialize a value to indented JSON text.
    pub fn stringify_pretty<T>(value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        serde_json::to_string_pretty(value).map_err(PolicySummaryError::from)
    }
}
