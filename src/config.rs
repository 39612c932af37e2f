//! Audit configuration helpers.
//!
//! This module loads, validates, and merges the audit config so a run is fully
//! determined before the first directory is read.
use crate::cli::AuditArgs;
use crate::pattern::placeholder_count;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_BASE_DIRECTORY: &str = "assets/images";
pub const DEFAULT_MAX_LEVEL: u32 = 5;
pub const DEFAULT_LEVEL_DIRECTORY: &str = "level{level}";

const DEFAULT_EXPECTED_PATTERNS: [&str; 6] = [
    "background{level}.png",
    "chibi_girl{level}.png",
    "victory_background{level}.png",
    "level_config.json",
    "block_layout.json",
    "available_bombs.json",
];

/// Everything that shapes one audit run. Fixed before the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    pub schema_version: u32,
    pub base_directory: PathBuf,
    pub max_level: u32,
    pub level_directory: String,
    pub expected_patterns: Vec<String>,
    pub check_json: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        default_config()
    }
}

impl AuditConfig {
    /// Level subdirectory for `level` under the base directory.
    pub fn level_path(&self, level: u32) -> PathBuf {
        self.base_directory
            .join(crate::pattern::expand_pattern(&self.level_directory, level))
    }
}

/// Build the config used when no file or flags say otherwise.
pub fn default_config() -> AuditConfig {
    AuditConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        base_directory: PathBuf::from(DEFAULT_BASE_DIRECTORY),
        max_level: DEFAULT_MAX_LEVEL,
        level_directory: DEFAULT_LEVEL_DIRECTORY.to_string(),
        expected_patterns: DEFAULT_EXPECTED_PATTERNS
            .iter()
            .map(|pattern| pattern.to_string())
            .collect(),
        check_json: false,
    }
}

/// Render the default config as pretty JSON.
pub fn config_stub() -> Result<String> {
    serde_json::to_string_pretty(&default_config()).context("serialize config stub")
}

/// Load a config file; fields it omits take their defaults.
pub fn load_config(path: &Path) -> Result<AuditConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: AuditConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse audit config JSON {}", path.display()))?;
    Ok(config)
}

/// Layer CLI overrides on top of `config`.
pub fn apply_overrides(mut config: AuditConfig, args: &AuditArgs) -> AuditConfig {
    if let Some(base_dir) = &args.base_dir {
        config.base_directory = base_dir.clone();
    }
    if let Some(max_level) = args.max_level {
        config.max_level = max_level;
    }
    if !args.patterns.is_empty() {
        config.expected_patterns = args.patterns.clone();
    }
    if let Some(level_dir) = &args.level_dir {
        config.level_directory = level_dir.clone();
    }
    if args.check_json {
        config.check_json = true;
    }
    config
}

/// Resolve the effective config for an audit invocation.
pub fn resolve_config(args: &AuditArgs) -> Result<AuditConfig> {
    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };
    let config = apply_overrides(base, args);
    validate_config(&config)?;
    tracing::info!(
        base_directory = %config.base_directory.display(),
        max_level = config.max_level,
        patterns = config.expected_patterns.len(),
        "resolved audit config"
    );
    Ok(config)
}

/// Validate the schema version, level range, and every template.
pub fn validate_config(config: &AuditConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported audit config schema_version {}",
            config.schema_version
        ));
    }
    if config.max_level == 0 {
        return Err(anyhow!("max_level must be at least 1"));
    }
    validate_template(&config.level_directory, "level_directory")?;
    if placeholder_count(&config.level_directory) != 1 {
        return Err(anyhow!(
            "level_directory must contain {{level}} exactly once (got {:?})",
            config.level_directory
        ));
    }
    if config.expected_patterns.is_empty() {
        return Err(anyhow!("expected_patterns must list at least one file"));
    }
    let mut seen = BTreeSet::new();
    for pattern in &config.expected_patterns {
        validate_template(pattern, "expected_patterns")?;
        if !seen.insert(pattern.as_str()) {
            return Err(anyhow!("expected_patterns lists {pattern:?} twice"));
        }
    }
    Ok(())
}

fn validate_template(template: &str, label: &str) -> Result<()> {
    if template.trim().is_empty() {
        return Err(anyhow!("{label} entries must be non-empty"));
    }
    if template.contains('/') || template.contains('\\') {
        return Err(anyhow!(
            "{label} entries must be plain names without path separators (got {template:?})"
        ));
    }
    if matches!(template, "." | "..") {
        return Err(anyhow!("{label} entries must not be {template:?}"));
    }
    if placeholder_count(template) > 1 {
        return Err(anyhow!(
            "{label} entries may contain {{level}} at most once (got {template:?})"
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
