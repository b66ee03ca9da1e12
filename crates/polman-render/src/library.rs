use crate::RenderableLibrary;
use std::fmt::Write as _;

pub fn render_library(library: &RenderableLibrary) -> String {
    let mut out = format!("Library: {}\n", library.library_id);
    if library.members.is_empty() {
        out.push_str("Policies: (none)\n");
        return out;
    }
    out.push_str("Policies:\n");
    for m in &library.members {
        let _ = writeln!(out, "  {}: {} (library: {})", m.policy_id, m.title, m.library);
    }
    out
}

/// `<library_id>: <n> policies` per library, in creation order.
pub fn render_library_list(libraries: &[(String, usize)]) -> String {
    if libraries.is_empty() {
        return "No libraries found.\n".to_string();
    }
    let mut out = String::new();
    for (id, count) in libraries {
        let noun = if *count == 1 { "policy" } else { "policies" };
        let _ = writeln!(out, "{id}: {count} {noun}");
    }
    out
}
