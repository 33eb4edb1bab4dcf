//! Statement normalization.

use log::trace;

use super::{normalize_field, simplify_principal};
use crate::model::Statement;
use crate::summary::StatementSummary;

/// Build the summary view of one statement.
///
/// `Sid` and `Effect` are copied verbatim: no validation, no case folding.
pub fn normalize_statement(stmt: &Statement) -> StatementSummary {
    let summary = StatementSummary {
        sid: stmt.sid.clone(),
        effect: stmt.effect.clone(),
        actions: normalize_field(&stmt.action),
        resources: normalize_field(&stmt.resource),
        principal_summary: simplify_principal(&stmt.principal),
        has_conditions: stmt.condition.is_some(),
    };

    trace!(
        "Normalized statement {:?}: {} actions, {} resources",
        summary.sid,
        summary.actions.len(),
        summary.resources.len()
    );

    summary
}
