use crate::{RenderableListEntry, RenderablePolicy, RenderableStats, RenderableVersion};
use polman_types::ChangeKind;
use std::fmt::Write as _;

/// The `view` block: header fields, current content and one line per version.
pub fn render_policy(policy: &RenderablePolicy) -> String {
    render_block(policy, |out, v| {
        let _ = writeln!(out, "  {}: {}", v.number, v.content);
    })
}

/// Like [`render_policy`], with the change kind, time and actor of every version.
pub fn render_history(policy: &RenderablePolicy) -> String {
    render_block(policy, |out, v| {
        let _ = write!(
            out,
            "  {}: {} [{} at {}",
            v.number,
            v.content,
            change_label(&v.change),
            v.recorded_at
        );
        if let Some(actor) = &v.actor {
            let _ = write!(out, " by {actor}");
        }
        out.push_str("]\n");
    })
}

fn render_block(
    policy: &RenderablePolicy,
    mut version_line: impl FnMut(&mut String, &RenderableVersion),
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", policy.policy_id);
    let _ = writeln!(out, "Title: {}", policy.title);
    let _ = writeln!(out, "Library: {}", policy.library);
    if let Some(owner) = &policy.owner {
        let _ = writeln!(out, "Owner: {owner}");
    }
    if let Some(status) = &policy.status {
        let _ = writeln!(out, "Status: {status}");
    }
    if let Some(reviewed) = &policy.last_reviewed_at {
        let _ = writeln!(out, "Last reviewed: {reviewed}");
    }
    let _ = writeln!(out, "Current version: {}", policy.content);
    out.push_str("Versions:\n");
    if policy.versions.is_empty() {
        out.push_str("  (no versions)\n");
    }
    for v in &policy.versions {
        version_line(&mut out, v);
    }
    out
}

fn change_label(change: &ChangeKind) -> String {
    match change {
        ChangeKind::Reverted { restored_from } => format!("reverted from {restored_from}"),
        other => other.as_str().replace('_', " "),
    }
}

pub fn render_policy_list(entries: &[RenderableListEntry]) -> String {
    if entries.is_empty() {
        return "No policies found.\n".to_string();
    }
    let mut out = String::new();
    for e in entries {
        let _ = writeln!(out, "{}: {} (library: {})", e.policy_id, e.title, e.library);
    }
    out
}

pub fn render_stats(stats: &RenderableStats) -> String {
    let mut out = format!("Total policies: {}\n", stats.total);
    if stats.libraries.is_empty() {
        out.push_str("No libraries found.\n");
        return out;
    }
    for (library, count) in &stats.libraries {
        let _ = writeln!(out, "{library}: {count}");
    }
    out
}
