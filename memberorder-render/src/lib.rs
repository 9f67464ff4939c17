//! Rendering helpers (markdown, plain text) for human-readable artifacts.

use memberorder_types::report::{CheckReport, Finding, FixReport, FixStatus};

pub fn render_check_md(report: &CheckReport) -> String {
    let mut out = String::new();
    out.push_str("# memberorder check\n\n");
    out.push_str(&format!(
        "- Documents: {}\n- Containers: {} (exempt {})\n- Findings: {}\n",
        report.summary.documents,
        report.summary.containers,
        report.summary.exempt,
        report.summary.findings
    ));
    if report.summary.cancelled {
        out.push_str("- Cancelled: analysis stopped early\n");
    }
    out.push('\n');

    out.push_str("## Findings\n\n");
    if report.findings.is_empty() {
        out.push_str("_No findings._\n");
        return out;
    }

    out.push_str("| Location | Container | Member | Rule |\n");
    out.push_str("|---|---|---|---|\n");
    for f in &report.findings {
        out.push_str(&format!(
            "| `{}` | `{}` | `{}` | {} |\n",
            location(f),
            f.container,
            f.subject,
            f.rule_id
        ));
    }

    out
}

/// One line per finding, compiler style: `path:line:col: RULE message`.
pub fn render_check_text(report: &CheckReport) -> String {
    let mut out = String::new();
    for f in &report.findings {
        out.push_str(&format!("{}: {} {}\n", location(f), f.rule_id, f.message));
    }
    out.push_str(&format!(
        "{} finding(s) in {} container(s) across {} document(s)",
        report.summary.findings, report.summary.containers, report.summary.documents
    ));
    if report.summary.cancelled {
        out.push_str(" (cancelled)");
    }
    out.push('\n');
    out
}

fn location(f: &Finding) -> String {
    match (f.line, f.column) {
        (Some(line), Some(col)) => format!("{}:{}:{}", f.path, line, col),
        _ => f.path.clone(),
    }
}

pub fn render_fix_md(report: &FixReport) -> String {
    let mut out = String::new();
    out.push_str("# memberorder fix\n\n");
    out.push_str(&format!(
        "- Mode: {}\n",
        if report.applied { "apply" } else { "dry-run" }
    ));
    out.push_str(&format!(
        "- Attempted: {}\n- Applied: {}\n- Skipped (overlap): {}\n- Unresolved: {}\n- Files modified: {}\n",
        report.summary.attempted,
        report.summary.applied,
        report.summary.skipped,
        report.summary.unresolved,
        report.summary.files_modified
    ));
    if let Some(bytes) = report.summary.patch_bytes {
        out.push_str(&format!("- Patch bytes: {}\n", bytes));
    }
    if report.summary.cancelled {
        out.push_str("- Cancelled: planning stopped early, nothing written\n");
    }
    out.push('\n');

    out.push_str("## Results\n\n");
    if report.results.is_empty() {
        out.push_str("_Nothing to fix._\n");
        return out;
    }

    for r in &report.results {
        out.push_str(&format!(
            "- `{}` `{}`: {}",
            r.path,
            r.container,
            status_label(r.status)
        ));
        if let Some(msg) = &r.message {
            out.push_str(&format!(" ({})", msg));
        }
        out.push('\n');
    }

    if !report.files.is_empty() {
        out.push_str("\n## Files\n\n");
        for f in &report.files {
            out.push_str(&format!(
                "- `{}` {} → {}\n",
                f.path,
                short_sha(&f.sha256_before),
                short_sha(&f.sha256_after)
            ));
        }
    }

    out
}

fn status_label(s: FixStatus) -> &'static str {
    match s {
        FixStatus::Applied => "applied",
        FixStatus::SkippedOverlap => "skipped_overlap",
        FixStatus::Unresolved => "unresolved",
        FixStatus::Unchanged => "unchanged",
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..12).unwrap_or(sha)
}
