//! Core check and fix pipelines, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: documents arrive through a [`DocumentSource`] and
//! report artifacts leave through a [`WritePort`].

use crate::cancel::CancellationFlag;
use crate::ports::{DocumentSource, WritePort};
use crate::settings::{CheckSettings, FixSettings};
use anyhow::Context;
use camino::Utf8Path;
use chrono::Utc;
use memberorder_domain::{Analysis, Analyzer};
use memberorder_edit::{
    ApplyOptions, DocumentPlan, EditError, apply_fixes, plan_document, render_patch,
};
use memberorder_render::{render_check_md, render_fix_md};
use memberorder_types::container::Container;
use memberorder_types::document::SourceDocument;
use memberorder_types::report::{
    CheckReport, Finding, FixReport, FixStatus, RULE_MEMBER_ORDER, ToolInfo,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Error type for pipeline results.  Exit code 2 = policy block, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("policy block: {0}")]
    PolicyBlock(String),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::PolicyBlock(_) => 2,
            ToolError::Internal(_) => 1,
        }
    }
}

impl From<EditError> for ToolError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::PolicyBlock(block) => ToolError::PolicyBlock(block.to_string()),
            EditError::Runtime(err) => ToolError::Internal(err),
        }
    }
}

/// Outcome of `run_check`.
pub struct CheckOutcome {
    pub report: CheckReport,
    /// True when at least one violation was found.
    pub policy_block: bool,
}

enum Visit {
    Skipped,
    Exempt,
    Ordered,
    Violation(Finding),
}

/// Run the check pipeline over every container of every document.
///
/// Containers are analyzed in parallel; findings are ordered by document path and offset, so
/// the report does not depend on scheduling.
pub fn run_check(
    settings: &CheckSettings,
    source: &dyn DocumentSource,
    cancel: &CancellationFlag,
    tool: ToolInfo,
) -> Result<CheckOutcome, ToolError> {
    let started_at = Utc::now();
    let docs = source.load_documents().context("load documents")?;
    let analyzer = Analyzer::new(settings.policy.clone());

    let work: Vec<(&SourceDocument, &Container)> = docs
        .iter()
        .flat_map(|doc| doc.containers.iter().map(move |c| (doc, c)))
        .collect();

    let visits: Vec<Visit> = work
        .par_iter()
        .map(|&(doc, container)| {
            if cancel.is_cancelled() {
                return Visit::Skipped;
            }
            match analyzer.analyze_container(container) {
                Analysis::Exempt(_) => Visit::Exempt,
                Analysis::Ordered => Visit::Ordered,
                Analysis::Violation(v) => {
                    let offset = v.location.offset;
                    let (line, column) = offset
                        .and_then(|o| doc.line_col(o))
                        .map_or((None, None), |(l, c)| (Some(l), Some(c)));
                    Visit::Violation(Finding {
                        id: finding_id(doc.path.as_str(), &container.name, &v.subject_name)
                            .to_string(),
                        rule_id: RULE_MEMBER_ORDER.to_string(),
                        message: v.message(),
                        path: doc.path.to_string(),
                        container: container.name.clone(),
                        subject: v.subject_name,
                        offset,
                        line,
                        column,
                    })
                }
            }
        })
        .collect();

    let mut report = CheckReport::new(tool);
    report.summary.documents = docs.len() as u64;
    for visit in visits {
        match visit {
            Visit::Skipped => report.summary.cancelled = true,
            Visit::Exempt => {
                report.summary.containers += 1;
                report.summary.exempt += 1;
            }
            Visit::Ordered => report.summary.containers += 1,
            Visit::Violation(finding) => {
                report.summary.containers += 1;
                report.findings.push(finding);
            }
        }
    }

    report.findings.sort_by(|a, b| {
        (&a.path, a.offset, &a.container, &a.subject).cmp(&(
            &b.path,
            b.offset,
            &b.container,
            &b.subject,
        ))
    });
    report.summary.findings = report.findings.len() as u64;
    report.run.started_at = Some(started_at);
    report.run.ended_at = Some(Utc::now());

    info!(
        documents = report.summary.documents,
        containers = report.summary.containers,
        findings = report.summary.findings,
        cancelled = report.summary.cancelled,
        "check finished"
    );

    let policy_block = !report.findings.is_empty();
    Ok(CheckOutcome {
        report,
        policy_block,
    })
}

fn finding_id(path: &str, container: &str, subject: &str) -> Uuid {
    const NAMESPACE: Uuid = Uuid::from_bytes([
        0x9a, 0x3e, 0x61, 0x0c, 0x2f, 0x47, 0x4d, 0x8b, 0xb1, 0x55, 0x7e, 0x02, 0xc4, 0x19, 0x6d,
        0x30,
    ]);
    let stable_key = format!("{RULE_MEMBER_ORDER}\n{path}\n{container}\n{subject}");
    Uuid::new_v5(&NAMESPACE, stable_key.as_bytes())
}

/// Outcome of `run_fix`.
pub struct FixOutcome {
    pub report: FixReport,
    pub plans: Vec<DocumentPlan>,
    pub patch: String,
}

/// Run the fix pipeline. Plans every document, renders the patch, and writes fixed documents
/// unless `settings.dry_run` or the run was cancelled.
pub fn run_fix(
    settings: &FixSettings,
    source: &dyn DocumentSource,
    writer: &dyn WritePort,
    cancel: &CancellationFlag,
    tool: ToolInfo,
) -> Result<FixOutcome, ToolError> {
    let started_at = Utc::now();
    let docs = source.load_documents().context("load documents")?;
    let analyzer = Analyzer::new(settings.policy.clone());

    let plans: Vec<DocumentPlan> = docs
        .par_iter()
        .map(|doc| plan_document(doc, &analyzer, || cancel.is_cancelled()))
        .collect();

    for plan in &plans {
        debug!(
            path = %plan.path,
            applied = plan.count(FixStatus::Applied),
            skipped = plan.count(FixStatus::SkippedOverlap),
            unresolved = plan.count(FixStatus::Unresolved),
            "planned document"
        );
    }

    // A cancelled run only covers part of the tree; never write a partial fix.
    let cancelled = cancel.is_cancelled();
    let dry_run = settings.dry_run || cancelled;
    if cancelled && !settings.dry_run {
        warn!("fix cancelled, nothing written");
    }

    let patch = render_patch(&plans);
    let opts = ApplyOptions {
        dry_run,
        backup_enabled: settings.backup_enabled,
        backup_suffix: settings.backup_suffix.clone(),
    };
    let files = apply_fixes(&settings.repo_root, &plans, &opts)?;

    let mut report = FixReport::new(tool);
    report.applied = !dry_run;
    report.summary.cancelled = cancelled;
    report.results = plans.iter().flat_map(|p| p.results.iter().cloned()).collect();
    for result in &report.results {
        report.summary.attempted += 1;
        match result.status {
            FixStatus::Applied => report.summary.applied += 1,
            FixStatus::SkippedOverlap => report.summary.skipped += 1,
            FixStatus::Unresolved => report.summary.unresolved += 1,
            FixStatus::Unchanged => {}
        }
    }
    report.summary.files_modified = if dry_run { 0 } else { files.len() as u64 };
    report.summary.patch_bytes = Some(patch.len() as u64);
    report.files = files;
    report.run.started_at = Some(started_at);
    report.run.ended_at = Some(Utc::now());

    info!(
        documents = plans.len(),
        applied = report.summary.applied,
        skipped = report.summary.skipped,
        unresolved = report.summary.unresolved,
        written = report.applied,
        cancelled,
        "fix finished"
    );

    let outcome = FixOutcome {
        report,
        plans,
        patch,
    };
    if let Some(out_dir) = &settings.out_dir {
        write_fix_artifacts(&outcome, out_dir, writer)?;
    }
    Ok(outcome)
}

/// Write the check report as `check.json` and `check.md`.
pub fn write_check_artifacts(
    outcome: &CheckOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let json = serde_json::to_string_pretty(&outcome.report).context("serialize check report")?;
    writer.write_file(&out_dir.join("check.json"), json.as_bytes())?;

    let md = render_check_md(&outcome.report);
    writer.write_file(&out_dir.join("check.md"), md.as_bytes())?;

    Ok(())
}

/// Write the fix report as `fix.json`, `fix.md` and `patch.diff`.
pub fn write_fix_artifacts(
    outcome: &FixOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let json = serde_json::to_string_pretty(&outcome.report).context("serialize fix report")?;
    writer.write_file(&out_dir.join("fix.json"), json.as_bytes())?;

    let md = render_fix_md(&outcome.report);
    writer.write_file(&out_dir.join("fix.md"), md.as_bytes())?;

    writer.write_file(&out_dir.join("patch.diff"), outcome.patch.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_ids_are_stable_and_distinct() {
        let a = finding_id("src/A.cs", "A", "count");
        assert_eq!(a, finding_id("src/A.cs", "A", "count"));
        assert_ne!(a, finding_id("src/A.cs", "A", "total"));
        assert_ne!(a, finding_id("src/B.cs", "A", "count"));
    }

    #[test]
    fn edit_errors_keep_their_exit_codes() {
        let block = ToolError::from(EditError::from(
            memberorder_edit::PolicyBlockError::PreconditionMismatch {
                message: "changed".to_string(),
            },
        ));
        assert_eq!(block.exit_code(), 2);

        let runtime = ToolError::from(EditError::from(anyhow::anyhow!("io")));
        assert_eq!(runtime.exit_code(), 1);
    }
}
