//! This crate provides the core logic for summarizing IAM policy documents:
//! - Policy document parsing, with polymorphic members decoded into explicit variants
//! - Statement normalization (actions, resources, principal simplification)
//! - Document-wide aggregation of unique actions, resources and principals
//! - Derived views (effect breakdown, relationship graph, statement tree)
//!
//! All analysis is pure and synchronous; see [`analyze`].

mod aggregate;
mod analyzer;
mod error;
mod input;
mod insights;
mod json;
mod model;
mod normalization;
pub mod render;
mod response;
mod summary;

// Re-exports for a small, focused public API
pub use aggregate::{aggregate, Aggregator};
pub use analyzer::{analyze, analyze_document, analyze_input, parse_document};
pub use error::{PolicySummaryError, Result, REJECTION_PREFIX};
pub use input::{InputFormat, PolicyInput, PolicyUploadRequest};
pub use insights::{
    effect_breakdown, relationship_graph, statement_tree, GraphLink, GraphNode, LinkKind, NodeKind,
    PolicyGraph, TreeNode, TreeNodeKind, UNKNOWN_EFFECT,
};
pub use json::JsonProvider;
pub use model::{FieldValue, PolicyDocument, PrincipalValue, Statement};
pub use normalization::{
    normalize_field, normalize_statement, simplify_principal, COMPLEX_PRINCIPAL_PREFIX,
};
pub use response::AnalysisResponse;
pub use summary::{summary_schema, PolicySummary, StatementSummary};
