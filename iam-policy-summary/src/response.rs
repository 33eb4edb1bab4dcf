//! Boundary response: a complete summary, or a single rejection message.

use serde::Serialize;

use crate::error::{PolicySummaryError, Result};
use crate::summary::PolicySummary;

/// What a caller receives for one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Summary(PolicySummary),
    /// `"Error parsing policy: " + <cause>`.
    Rejected(String),
}

impl AnalysisResponse {
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl From<Result<PolicySummary>> for AnalysisResponse {
    fn from(result: Result<PolicySummary>) -> Self {
        match result {
            Ok(summary) => Self::Summary(summary),
            Err(err) => Self::Rejected(err.rejection_message()),
        }
    }
}

impl From<PolicySummaryError> for AnalysisResponse {
    fn from(err: PolicySummaryError) -> Self {
        Self::Rejected(err.rejection_message())
    }
}
