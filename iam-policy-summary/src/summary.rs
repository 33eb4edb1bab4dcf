//! Summary types produced by analysis.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PolicySummaryError, Result};

/// Normalized view of one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Normalized view of a single policy statement")]
pub struct StatementSummary {
    #[schemars(description = "Author-supplied statement identifier")]
    pub sid: Option<String>,

    #[schemars(description = "Statement effect, copied verbatim")]
    pub effect: String,

    #[schemars(description = "Actions in document order")]
    pub actions: Vec<String>,

    #[schemars(description = "Resources in document order")]
    pub resources: Vec<String>,

    #[schemars(
        description = "Principal as written, or a 'complex principal: ' label for structured principals"
    )]
    pub principal_summary: Option<String>,

    #[schemars(description = "Whether the statement carries a Condition block")]
    pub has_conditions: bool,
}

/// Document-wide summary of a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Analysis-friendly summary of an IAM policy document")]
pub struct PolicySummary {
    #[schemars(description = "Policy language version")]
    pub policy_version: String,

    #[schemars(description = "Number of statements in the document")]
    pub total_statements: usize,

    #[schemars(description = "Deduplicated actions across all statements")]
    pub unique_actions: BTreeSet<String>,

    #[schemars(description = "Deduplicated resources across all statements")]
    pub unique_resources: BTreeSet<String>,

    #[schemars(description = "Deduplicated principal summaries across all statements")]
    pub principals: BTreeSet<String>,

    #[schemars(description = "Per-statement summaries in document order")]
    pub statements: Vec<StatementSummary>,
}

/// JSON schema of the [`PolicySummary`] payload.
pub fn summary_schema() -> Result<serde_json::Value> {
    serde_json::to_value(schemars::schema_for!(PolicySummary)).map_err(PolicySummaryError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_statement() -> StatementSummary {
        StatementSummary {
            sid: None,
            effect: "Deny".into(),
            actions: vec!["iam:*".into()],
            resources: vec![],
            principal_summary: None,
            has_conditions: true,
        }
    }

    #[test]
    fn test_statement_summary_uses_camel_case() {
        let json = serde_json::to_string(&sample_statement()).unwrap();
        assert_eq!(
            json,
            r#"{"sid":null,"effect":"Deny","actions":["iam:*"],"resources":[],"principalSummary":null,"hasConditions":true}"#
        );
    }

    #[test]
    fn test_policy_summary_field_names() {
        let summary = PolicySummary {
            policy_version: "2012-10-17".into(),
            total_statements: 1,
            unique_actions: BTreeSet::from(["iam:*".to_string()]),
            unique_resources: BTreeSet::new(),
            principals: BTreeSet::new(),
            statements: vec![sample_statement()],
        };
        let value = serde_json::to_value(&summary).unwrap();
        for key in [
            "policyVersion",
            "totalStatements",
            "uniqueActions",
            "uniqueResources",
            "principals",
            "statements",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_summary_schema_describes_payload() {
        let schema = summary_schema().unwrap();
        let properties = schema.get("properties").expect("schema has properties");
        assert!(properties.get("uniqueActions").is_some());
        assert!(properties.get("statements").is_some());
    }
}
