//! Error types for policy analysis.

use serde_json::error::Category;
use thiserror::Error;

/// Prefix of every message handed back to a caller whose policy was rejected.
pub const REJECTION_PREFIX: &str = "Error parsing policy: ";

/// Errors that can occur while turning raw policy text into a summary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicySummaryError {
    /// The input is not well-formed JSON.
    #[error("{message}")]
    Parse { message: String },

    /// The input is valid JSON but does not have the policy document shape.
    #[error("{message}")]
    Schema { message: String },
}

impl PolicySummaryError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// The single human-readable message surfaced to a caller.
    pub fn rejection_message(&self) -> String {
        format!("{REJECTION_PREFIX}{}", self)
    }
}

impl From<serde_json::Error> for PolicySummaryError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::schema(err.to_string()),
            Category::Syntax | Category::Eof | Category::Io => Self::parse(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PolicySummaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_errors_classify_as_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{\"Version\":").unwrap_err();
        assert!(matches!(
            PolicySummaryError::from(err),
            PolicySummaryError::Parse { .. }
        ));
    }

    #[test]
    fn test_shape_errors_classify_as_schema() {
        let err = serde_json::from_str::<Vec<String>>("{}").unwrap_err();
        assert!(matches!(
            PolicySummaryError::from(err),
            PolicySummaryError::Schema { .. }
        ));
    }

    #[test]
    fn test_rejection_message_prefix() {
        let err = PolicySummaryError::schema("missing field `Version`");
        assert_eq!(
            err.rejection_message(),
            "Error parsing policy: missing field `Version`"
        );
    }
}
