//! Clap-free settings for check and fix pipelines.

use camino::Utf8PathBuf;
use memberorder_domain::ExemptionPolicy;

/// Settings for the check pipeline. Documents come from the `DocumentSource`, so checking
/// needs no repository root.
#[derive(Debug, Clone, Default)]
pub struct CheckSettings {
    pub policy: ExemptionPolicy,
}

/// Settings for the fix pipeline.
#[derive(Debug, Clone)]
pub struct FixSettings {
    pub repo_root: Utf8PathBuf,
    /// Where `fix.json`, `fix.md` and `patch.diff` are written; `None` skips artifacts.
    pub out_dir: Option<Utf8PathBuf>,
    pub policy: ExemptionPolicy,

    pub dry_run: bool,

    // Backups
    pub backup_enabled: bool,
    pub backup_suffix: String,
}

impl Default for FixSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            out_dir: None,
            policy: ExemptionPolicy::default(),
            dry_run: true,
            backup_enabled: true,
            backup_suffix: ".memberorder.bak".to_string(),
        }
    }
}
