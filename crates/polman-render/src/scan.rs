use crate::RenderableScan;
use std::fmt::Write as _;

/// One section per policy, clean policies on a single line, then a summary line.
pub fn render_scan(scans: &[RenderableScan]) -> String {
    if scans.is_empty() {
        return "No policies found.\n".to_string();
    }

    let mut out = String::new();
    let mut flagged = 0usize;
    for scan in scans {
        if scan.recommendations.is_empty() {
            let _ = writeln!(out, "{}: ok (last updated {})", scan.policy_id, scan.last_updated);
            continue;
        }
        flagged += 1;
        let _ = writeln!(out, "{} (last updated {}):", scan.policy_id, scan.last_updated);
        for r in &scan.recommendations {
            let _ = writeln!(out, "  - [{}] {}", r.code, r.message);
        }
    }
    let _ = writeln!(
        out,
        "Scanned {} policies; {} need attention.",
        scans.len(),
        flagged
    );
    out
}
