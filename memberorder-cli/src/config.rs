//! Configuration file loading for memberorder.
//!
//! Discovers and loads `memberorder.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI extends, never replaces).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use memberorder_domain::ExemptionPolicy;
use memberorder_types::container::QualifiedName;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "memberorder.toml";

/// Top-level configuration from memberorder.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberorderConfig {
    pub exemptions: ExemptionsConfig,
    pub fix: FixConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExemptionsConfig {
    /// Base types whose subclasses are never analyzed. `None` means the built-in default; an
    /// explicit empty list disables base-type exemption.
    pub ignored_base_types: Option<Vec<QualifiedName>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// Whether to back up documents before writing fixes.
    pub backups: bool,
    pub backup_suffix: String,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            backups: true,
            backup_suffix: ".memberorder.bak".to_string(),
        }
    }
}

/// Searches for `memberorder.toml` in the repository root directory.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<MemberorderConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<MemberorderConfig> {
    let config: MemberorderConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<MemberorderConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(MemberorderConfig::default()),
    }
}

/// Configuration after CLI arguments are applied on top of the file.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub policy: ExemptionPolicy,
    pub backup_enabled: bool,
    pub backup_suffix: String,
}

pub struct ConfigMerger {
    config: MemberorderConfig,
}

impl ConfigMerger {
    pub fn new(config: MemberorderConfig) -> Self {
        Self { config }
    }

    /// CLI `--ignore-base` entries extend the file (or default) ignore-list; `--no-backups`
    /// turns backups off.
    pub fn merge(self, cli_ignore_base: &[String], no_backups: bool) -> MergedConfig {
        let mut ignored = match self.config.exemptions.ignored_base_types {
            Some(list) => list,
            None => ExemptionPolicy::default().ignored_base_types,
        };
        for raw in cli_ignore_base {
            let name = QualifiedName::parse(raw.trim());
            if !ignored.contains(&name) {
                ignored.push(name);
            }
        }

        MergedConfig {
            policy: ExemptionPolicy::new(ignored),
            backup_enabled: self.config.fix.backups && !no_backups,
            backup_suffix: self.config.fix.backup_suffix,
        }
    }
}
