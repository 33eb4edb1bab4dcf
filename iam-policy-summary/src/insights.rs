//! Views derived from a finished summary: effect breakdown, the
//! principal/statement/action/resource relationship graph, and the
//! per-statement tree.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::summary::PolicySummary;

/// Label used for statements whose effect is empty.
pub const UNKNOWN_EFFECT: &str = "Unknown";

/// Count statements per effect string.
///
/// Counts always sum to `summary.total_statements`.
pub fn effect_breakdown(summary: &PolicySummary) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for stmt in &summary.statements {
        let effect = if stmt.effect.is_empty() {
            UNKNOWN_EFFECT
        } else {
            stmt.effect.as_str()
        };
        *counts.entry(effect.to_string()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Statement,
    Action,
    Resource,
    Principal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// statement -> action
    Allows,
    /// statement -> resource
    Affects,
    /// principal -> statement
    Has,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
}

/// Node/link graph of a policy. Nodes are unique by id, in first-seen order;
/// links are one per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl PolicyGraph {
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }
}

#[derive(Default)]
struct GraphBuilder {
    graph: PolicyGraph,
    seen: HashSet<String>,
}

impl GraphBuilder {
    fn node(&mut self, kind: NodeKind, id: String, label: &str) -> String {
        if self.seen.insert(id.clone()) {
            self.graph.nodes.push(GraphNode {
                id: id.clone(),
                label: label.to_string(),
                kind,
                effect: None,
                sid: None,
            });
        }
        id
    }

    fn link(&mut self, source: String, target: String, kind: LinkKind) {
        self.graph.links.push(GraphLink {
            source,
            target,
            kind,
        });
    }
}

/// Build the relationship graph of a summary.
pub fn relationship_graph(summary: &PolicySummary) -> PolicyGraph {
    let mut builder = GraphBuilder::default();

    for (index, stmt) in summary.statements.iter().enumerate() {
        let stmt_id = format!("stmt-{index}");
        builder.seen.insert(stmt_id.clone());
        builder.graph.nodes.push(GraphNode {
            id: stmt_id.clone(),
            label: format!("Statement {}", index + 1),
            kind: NodeKind::Statement,
            effect: Some(stmt.effect.clone()),
            sid: stmt.sid.clone(),
        });

        for action in &stmt.actions {
            let id = builder.node(NodeKind::Action, format!("action-{action}"), action);
            builder.link(stmt_id.clone(), id, LinkKind::Allows);
        }

        for resource in &stmt.resources {
            let id = builder.node(NodeKind::Resource, format!("resource-{resource}"), resource);
            builder.link(stmt_id.clone(), id, LinkKind::Affects);
        }

        if let Some(principal) = &stmt.principal_summary {
            let id = builder.node(
                NodeKind::Principal,
                format!("principal-{principal}"),
                principal,
            );
            builder.link(id, stmt_id, LinkKind::Has);
        }
    }

    builder.graph
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeNodeKind {
    Root,
    Statement,
    Actions,
    Action,
    Resources,
    Resource,
    Principal,
    Conditions,
}

/// One node of the statement tree. Leaves carry the full `value` they stand for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TreeNodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn branch(kind: TreeNodeKind, name: String) -> Self {
        Self {
            name,
            kind,
            effect: None,
            sid: None,
            value: None,
            children: Vec::new(),
        }
    }

    fn leaf(kind: TreeNodeKind, name: String, value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::branch(kind, name)
        }
    }

    fn group(kind: TreeNodeKind, title: &str, leaf_kind: TreeNodeKind, items: &[String]) -> Self {
        Self {
            children: items
                .iter()
                .map(|item| Self::leaf(leaf_kind, item.clone(), item))
                .collect(),
            ..Self::branch(kind, format!("{title} ({})", items.len()))
        }
    }
}

/// Build the policy -> statement -> actions/resources/principal tree.
///
/// Empty action and resource lists get no group node; a principal and a
/// conditions marker appear only when present.
pub fn statement_tree(summary: &PolicySummary) -> TreeNode {
    let mut root = TreeNode::branch(
        TreeNodeKind::Root,
        format!("IAM Policy ({} statements)", summary.total_statements),
    );

    for (index, stmt) in summary.statements.iter().enumerate() {
        let effect = if stmt.effect.is_empty() {
            UNKNOWN_EFFECT
        } else {
            stmt.effect.as_str()
        };
        let mut node = TreeNode {
            effect: Some(stmt.effect.clone()),
            sid: stmt.sid.clone(),
            ..TreeNode::branch(
                TreeNodeKind::Statement,
                format!("Statement {} ({effect})", index + 1),
            )
        };

        if !stmt.actions.is_empty() {
            node.children.push(TreeNode::group(
                TreeNodeKind::Actions,
                "Actions",
                TreeNodeKind::Action,
                &stmt.actions,
            ));
        }
        if !stmt.resources.is_empty() {
            node.children.push(TreeNode::group(
                TreeNodeKind::Resources,
                "Resources",
                TreeNodeKind::Resource,
                &stmt.resources,
            ));
        }
        if let Some(principal) = &stmt.principal_summary {
            node.children.push(TreeNode::leaf(
                TreeNodeKind::Principal,
                format!("Principal: {principal}"),
                principal,
            ));
        }
        if stmt.has_conditions {
            node.children.push(TreeNode::branch(
                TreeNodeKind::Conditions,
                "Has Conditions".to_string(),
            ));
        }

        root.children.push(node);
    }

    root
}
