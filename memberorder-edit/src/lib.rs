//! Edit engine for memberorder fixes.
//!
//! Responsibilities:
//! - Rebuild violating containers in canonical order (`reorder`, `trivia`).
//! - Commit per-container replacements into a document snapshot (`batch`).
//! - Render a unified diff preview.
//! - Write changed documents to disk behind sha256 preconditions.

pub mod batch;
pub mod error;
pub mod reorder;
pub mod trivia;

pub use batch::{CommitOutcome, Disposition, EditBatch, Replacement};
pub use error::{EditError, EditResult, PolicyBlockError};
pub use reorder::{blank_lines_between, fix};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use memberorder_domain::Analyzer;
use memberorder_types::container::Container;
use memberorder_types::document::SourceDocument;
use memberorder_types::report::{FixFile, FixResult, FixStatus};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// The outcome of fixing one document in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPlan {
    pub path: Utf8PathBuf,
    /// Hash of `before`; checked against the file on disk before writing.
    pub sha256_before: String,
    pub before: String,
    pub after: String,
    pub results: Vec<FixResult>,
}

impl DocumentPlan {
    pub fn is_changed(&self) -> bool {
        self.before != self.after
    }

    pub fn count(&self, status: FixStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// True when rendering the container's members reproduces the text under its span.
pub fn is_resolvable(text: &str, container: &Container) -> bool {
    text.get(container.span.start..container.span.end)
        .is_some_and(|slice| slice == container.members_source())
}

/// Fixes every violating container of `doc` against one snapshot of its text.
///
/// `cancelled` is polled before each container; once it returns true the remaining containers
/// are left alone and the plan covers only the work done so far.
pub fn plan_document(
    doc: &SourceDocument,
    analyzer: &Analyzer,
    cancelled: impl Fn() -> bool,
) -> DocumentPlan {
    let path = doc.path.to_string();
    let mut batch = EditBatch::new();
    // One slot per visited violating container, in document order; pending slots point into
    // the batch and are settled after the commit.
    let mut slots: Vec<(&Container, Option<FixResult>)> = Vec::new();

    for container in &doc.containers {
        if cancelled() {
            debug!(path = %path, "fix cancelled");
            break;
        }
        if analyzer.analyze(container).is_none() {
            continue;
        }

        if !is_resolvable(&doc.text, container) {
            warn!(path = %path, container = %container.name, "container does not match document text");
            slots.push((container, Some(result(&path, container, FixStatus::Unresolved, None))));
            continue;
        }

        let replacement = fix(container).members_source();
        if replacement == container.members_source() {
            slots.push((container, Some(result(&path, container, FixStatus::Unchanged, None))));
            continue;
        }

        batch.push(Replacement::new(
            container.span,
            replacement,
            container.name.clone(),
        ));
        slots.push((container, None));
    }

    let outcome = batch.commit(&doc.text);
    let mut dispositions = outcome.dispositions.iter();
    let mut results = Vec::with_capacity(slots.len());
    for (container, settled) in slots {
        if let Some(r) = settled {
            results.push(r);
            continue;
        }
        let Some(disposition) = dispositions.next() else {
            break;
        };
        let r = match disposition {
            Disposition::Applied => result(&path, container, FixStatus::Applied, None),
            Disposition::Overlapping { with } => {
                let other = &batch.edits()[*with].label;
                warn!(path = %path, container = %container.name, overlaps = %other, "skipping overlapping fix");
                result(
                    &path,
                    container,
                    FixStatus::SkippedOverlap,
                    Some(format!("overlaps fix for '{other}'")),
                )
            }
            Disposition::OutOfBounds => result(
                &path,
                container,
                FixStatus::Unresolved,
                Some("span outside document".to_string()),
            ),
        };
        results.push(r);
    }

    DocumentPlan {
        path: doc.path.clone(),
        sha256_before: sha256_hex(doc.text.as_bytes()),
        before: doc.text.clone(),
        after: outcome.text,
        results,
    }
}

fn result(
    path: &str,
    container: &Container,
    status: FixStatus,
    message: Option<String>,
) -> FixResult {
    FixResult {
        path: path.to_string(),
        container: container.name.clone(),
        status,
        message,
    }
}

/// Unified diff over every changed plan.
pub fn render_patch(plans: &[DocumentPlan]) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for plan in plans.iter().filter(|p| p.is_changed()) {
        out.push_str(&format!("diff --git a/{0} b/{0}\n", plan.path));

        let patch = diffy::create_patch(&plan.before, &plan.after);
        out.push_str(&formatter.fmt_patch(&patch).to_string());
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub dry_run: bool,
    pub backup_enabled: bool,
    pub backup_suffix: String,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            dry_run: true,
            backup_enabled: true,
            backup_suffix: ".memberorder.bak".to_string(),
        }
    }
}

/// Checks that every changed document still hashes to its planned snapshot.
pub fn verify_preconditions(root: &Utf8Path, plans: &[DocumentPlan]) -> EditResult<()> {
    let mut mismatches = Vec::new();

    for plan in plans.iter().filter(|p| p.is_changed()) {
        let abs = abs_path(root, &plan.path);
        match fs::read(&abs) {
            Ok(bytes) => {
                let actual = sha256_hex(&bytes);
                if actual != plan.sha256_before {
                    mismatches.push(format!(
                        "{}: expected {}, got {}",
                        plan.path, plan.sha256_before, actual
                    ));
                }
            }
            Err(_) => mismatches.push(format!("{}: file missing", plan.path)),
        }
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(PolicyBlockError::PreconditionMismatch {
            message: mismatches.join("; "),
        }
        .into())
    }
}

/// Writes every changed plan under `root`.
///
/// Nothing is written unless all preconditions hold. In dry-run mode the returned file records
/// describe what would change.
pub fn apply_fixes(
    root: &Utf8Path,
    plans: &[DocumentPlan],
    opts: &ApplyOptions,
) -> EditResult<Vec<FixFile>> {
    let changed: Vec<&DocumentPlan> = plans.iter().filter(|p| p.is_changed()).collect();
    let mut files = Vec::with_capacity(changed.len());

    if !opts.dry_run {
        verify_preconditions(root, plans)?;
    }

    for plan in changed {
        let mut file = FixFile {
            path: plan.path.to_string(),
            sha256_before: plan.sha256_before.clone(),
            sha256_after: sha256_hex(plan.after.as_bytes()),
            backup_path: None,
        };

        if !opts.dry_run {
            let abs = abs_path(root, &plan.path);
            if opts.backup_enabled {
                let backup = Utf8PathBuf::from(format!("{}{}", abs, opts.backup_suffix));
                fs::copy(&abs, &backup).with_context(|| format!("backup {}", abs))?;
                file.backup_path = Some(backup.to_string());
            }
            fs::write(&abs, &plan.after).with_context(|| format!("write {}", abs))?;
            debug!(path = %plan.path, "wrote fixed document");
        }

        files.push(file);
    }

    Ok(files)
}

fn abs_path(root: &Utf8Path, rel: &Utf8Path) -> Utf8PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
