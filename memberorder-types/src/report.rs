use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rule identifier for member-order findings.
pub const RULE_MEMBER_ORDER: &str = "MO0001";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// One reported ordering violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Deterministic id derived from path, container and subject.
    pub id: String,
    pub rule_id: String,
    pub message: String,
    pub path: String,
    pub container: String,
    pub subject: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub documents: u64,
    pub containers: u64,
    pub exempt: u64,
    pub findings: u64,

    /// True when a cancellation request stopped analysis before every container was visited.
    #[serde(default)]
    pub cancelled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    #[serde(default)]
    pub findings: Vec<Finding>,

    pub summary: CheckSummary,
}

impl CheckReport {
    pub fn new(tool: ToolInfo) -> Self {
        Self {
            schema: crate::schema::MEMBERORDER_CHECK_V1.to_string(),
            tool,
            run: RunInfo::default(),
            findings: vec![],
            summary: CheckSummary::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixStatus {
    /// Replacement committed into the document.
    Applied,
    /// Replacement overlapped one committed earlier in the same batch.
    SkippedOverlap,
    /// The container no longer matches the document text.
    Unresolved,
    /// Already in canonical order and spacing.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixResult {
    pub path: String,
    pub container: String,
    pub status: FixStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSummary {
    pub attempted: u64,
    pub applied: u64,
    pub skipped: u64,
    pub unresolved: u64,
    pub files_modified: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_bytes: Option<u64>,

    /// True when a cancellation request stopped planning early. Nothing is written then.
    #[serde(default)]
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixFile {
    pub path: String,
    pub sha256_before: String,
    pub sha256_after: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    /// False for dry runs.
    pub applied: bool,

    #[serde(default)]
    pub results: Vec<FixResult>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FixFile>,

    pub summary: FixSummary,
}

impl FixReport {
    pub fn new(tool: ToolInfo) -> Self {
        Self {
            schema: crate::schema::MEMBERORDER_FIX_V1.to_string(),
            tool,
            run: RunInfo::default(),
            applied: false,
            results: vec![],
            files: vec![],
            summary: FixSummary::default(),
        }
    }
}
