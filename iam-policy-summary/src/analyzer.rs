//! Policy analysis: parse, normalize every statement, aggregate, assemble.
//!
//! Every entry point is a pure function of its input. There is no state shared
//! between calls, so any number of callers may analyze documents concurrently.
//! Failure is atomic: either a complete summary or an error is returned.

use log::{debug, info};
use serde_json::Value;

use crate::aggregate::aggregate;
use crate::error::{PolicySummaryError, Result};
use crate::input::PolicyInput;
use crate::json::JsonProvider;
use crate::model::PolicyDocument;
use crate::normalization::normalize_statement;
use crate::summary::PolicySummary;

/// Parse raw text into a policy document.
///
/// Fails with a `Parse` error when the text is not JSON, and with a `Schema`
/// error when the top level is not an object with a string `Version` and an
/// array-of-objects `Statement`.
pub fn parse_document(raw: &str) -> Result<PolicyDocument> {
    let value = JsonProvider::parse_to_value(raw)?;
    ensure_object_shape(&value)?;
    let document: PolicyDocument = JsonProvider::from_value(value)?;

    debug!(
        "Parsed policy document version {} with {} statements",
        document.version,
        document.statements.len()
    );

    Ok(document)
}

// serde's derived struct visitors also accept JSON arrays, so the document and
// each statement are required to be objects up front.
fn ensure_object_shape(value: &Value) -> Result<()> {
    let Some(document) = value.as_object() else {
        return Err(PolicySummaryError::schema(
            "policy document must be a JSON object",
        ));
    };

    if let Some(Value::Array(statements)) = document.get("Statement") {
        if let Some(index) = statements.iter().position(|s| !s.is_object()) {
            return Err(PolicySummaryError::schema(format!(
                "Statement[{index}] must be a JSON object"
            )));
        }
    }

    Ok(())
}

/// Summarize an already-parsed document. Never fails.
pub fn analyze_document(document: &PolicyDocument) -> PolicySummary {
    let statements: Vec<_> = document.statements.iter().map(normalize_statement).collect();
    let aggregates = aggregate(&statements);

    debug!(
        "Aggregated {} unique actions, {} unique resources, {} principals",
        aggregates.unique_actions.len(),
        aggregates.unique_resources.len(),
        aggregates.principals.len()
    );

    PolicySummary {
        policy_version: document.version.clone(),
        total_statements: document.statements.len(),
        unique_actions: aggregates.unique_actions,
        unique_resources: aggregates.unique_resources,
        principals: aggregates.principals,
        statements,
    }
}

/// Analyze raw policy document text.
pub fn analyze(raw: &str) -> Result<PolicySummary> {
    let document = parse_document(raw)?;
    Ok(analyze_document(&document))
}

/// Analyze input from either ingestion path.
pub fn analyze_input(input: &PolicyInput) -> Result<PolicySummary> {
    if let Some(name) = input.policy_name() {
        info!("Analyzing policy '{}'", name);
    }
    analyze(input.policy_text())
}
