//! Output rendering: JSON payloads and the human-readable text report.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use iam_policy_summary::{
    effect_breakdown, JsonProvider, PolicySummary, TreeNode, TreeNodeKind, UNKNOWN_EFFECT,
};

/// Pretty JSON when asked for, or when stdout is a terminal.
pub fn use_pretty_json(requested: bool) -> bool {
    requested || atty::is(atty::Stream::Stdout)
}

/// Disable colors unless stdout is a terminal.
pub fn configure_colors() {
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        JsonProvider::stringify_pretty(value)?
    } else {
        JsonProvider::stringify(value)?
    };
    Ok(rendered)
}

fn colored_effect(effect: &str) -> String {
    match effect {
        "Allow" => effect.green().bold().to_string(),
        "Deny" => effect.red().bold().to_string(),
        "" => UNKNOWN_EFFECT.yellow().to_string(),
        other => other.yellow().to_string(),
    }
}

fn push_list<'a>(
    out: &mut String,
    title: &str,
    items: impl IntoIterator<Item = &'a String>,
    empty: &str,
) {
    out.push_str(&format!("  {}:\n", title));
    let mut any = false;
    for item in items {
        any = true;
        out.push_str(&format!("    {}\n", item));
    }
    if !any {
        out.push_str(&format!("    {}\n", empty.dimmed()));
    }
}

/// Render a summary as a text report.
pub fn render_text(summary: &PolicySummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        "Policy Version:".bold(),
        summary.policy_version
    ));
    out.push_str(&format!(
        "Statements: {}  Unique Actions: {}  Resources: {}  Principals: {}\n",
        summary.total_statements,
        summary.unique_actions.len(),
        summary.unique_resources.len(),
        summary.principals.len()
    ));

    let effects: Vec<String> = effect_breakdown(summary)
        .into_iter()
        .map(|(effect, count)| format!("{} {}", colored_effect(&effect), count))
        .collect();
    if !effects.is_empty() {
        out.push_str(&format!("Effects: {}\n", effects.join(", ")));
    }

    out.push_str(&format!("\n{}\n", "All Unique Actions".bold()));
    push_list(&mut out, "Actions", &summary.unique_actions, "No actions found");
    out.push_str(&format!("{}\n", "All Unique Resources".bold()));
    push_list(
        &mut out,
        "Resources",
        &summary.unique_resources,
        "No resources found",
    );
    if !summary.principals.is_empty() {
        out.push_str(&format!("{}\n", "All Principals".bold()));
        push_list(&mut out, "Principals", &summary.principals, "");
    }

    out.push_str(&format!("\n{}\n", "Statement Details".bold()));
    if summary.statements.is_empty() {
        out.push_str(&format!("  {}\n", "No statements found".dimmed()));
    }
    for (index, stmt) in summary.statements.iter().enumerate() {
        out.push_str(&format!(
            "Statement {} [{}]",
            index + 1,
            colored_effect(&stmt.effect)
        ));
        if let Some(sid) = &stmt.sid {
            out.push_str(&format!(" ID: {}", sid));
        }
        out.push('\n');

        push_list(&mut out, "Actions", &stmt.actions, "No actions specified");
        push_list(&mut out, "Resources", &stmt.resources, "No resources specified");
        if let Some(principal) = &stmt.principal_summary {
            out.push_str(&format!("  Principal: {}\n", principal));
        }
        if stmt.has_conditions {
            out.push_str(&format!("  {}\n", "Has additional conditions".yellow()));
        }
    }

    out.trim_end().to_string()
}

/// Render the statement tree as an indented outline.
pub fn render_tree(tree: &TreeNode) -> String {
    let mut out = String::new();
    push_tree(&mut out, tree, 0);
    out.trim_end().to_string()
}

fn push_tree(out: &mut String, node: &TreeNode, depth: usize) {
    let name = match node.kind {
        TreeNodeKind::Root => node.name.bold().to_string(),
        TreeNodeKind::Statement => match node.effect.as_deref() {
            Some("Allow") => node.name.green().to_string(),
            Some("Deny") => node.name.red().to_string(),
            _ => node.name.yellow().to_string(),
        },
        TreeNodeKind::Conditions => node.name.yellow().to_string(),
        _ => node.name.clone(),
    };
    out.push_str(&format!("{}{}\n", "  ".repeat(depth), name));
    for child in &node.children {
        push_tree(out, child, depth + 1);
    }
}
