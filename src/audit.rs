//! Per-level asset auditing.
//!
//! Each level produces a [`LevelReport`] whatever happens on disk. A missing
//! directory, a missing file, or an extra file is a finding; an I/O error while
//! listing or reading metadata becomes [`LevelOutcome::Failed`] and the run
//! moves on to the next level.
//!
//! ```text
//! AuditReport
//! ├── levels: [LevelReport, ...]   (ascending, one per level in 1..=max_level)
//! │   ├── DirectoryMissing
//! │   ├── Scanned { entry_count, expected, unexpected }
//! │   └── Failed { message, entry_count?, expected so far }
//! └── summary: counts across every level
//! ```
use crate::config::AuditConfig;
use crate::pattern::expand_all;
use crate::source::AssetSource;
use crate::util::error_chain_message;
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// One expected file name checked against a level directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedFinding {
    pub name: String,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LevelOutcome {
    DirectoryMissing,
    Scanned {
        entry_count: usize,
        expected: Vec<ExpectedFinding>,
        unexpected: Vec<String>,
    },
    /// Findings recorded before the fault are kept in `expected`.
    Failed {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entry_count: Option<usize>,
        expected: Vec<ExpectedFinding>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelReport {
    pub level: u32,
    pub directory: PathBuf,
    #[serde(flatten)]
    pub outcome: LevelOutcome,
}

impl LevelReport {
    pub fn expected(&self) -> &[ExpectedFinding] {
        match &self.outcome {
            LevelOutcome::DirectoryMissing => &[],
            LevelOutcome::Scanned { expected, .. } | LevelOutcome::Failed { expected, .. } => {
                expected
            }
        }
    }

    pub fn unexpected(&self) -> &[String] {
        match &self.outcome {
            LevelOutcome::Scanned { unexpected, .. } => unexpected,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub levels: usize,
    pub missing_dirs: usize,
    pub missing_files: usize,
    pub unexpected_files: usize,
    pub invalid_json: usize,
    pub errors: usize,
}

impl AuditSummary {
    pub fn from_levels(levels: &[LevelReport]) -> Self {
        let mut summary = AuditSummary {
            levels: levels.len(),
            ..AuditSummary::default()
        };
        for report in levels {
            match &report.outcome {
                LevelOutcome::DirectoryMissing => summary.missing_dirs += 1,
                LevelOutcome::Failed { .. } => summary.errors += 1,
                LevelOutcome::Scanned { .. } => {}
            }
            for finding in report.expected() {
                if !finding.found {
                    summary.missing_files += 1;
                }
                if finding.json_error.is_some() {
                    summary.invalid_json += 1;
                }
            }
            summary.unexpected_files += report.unexpected().len();
        }
        summary
    }

    /// True when anything other than a clean, complete level was seen.
    pub fn has_findings(&self) -> bool {
        self.missing_dirs > 0
            || self.missing_files > 0
            || self.unexpected_files > 0
            || self.invalid_json > 0
            || self.errors > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub schema_version: u32,
    pub base_directory: PathBuf,
    pub max_level: u32,
    pub levels: Vec<LevelReport>,
    pub summary: AuditSummary,
}

/// Audits a leveled asset tree through an [`AssetSource`].
pub struct Auditor<'a, S: AssetSource> {
    config: &'a AuditConfig,
    source: &'a S,
}

#[derive(Default)]
struct ScanProgress {
    entry_count: Option<usize>,
    expected: Vec<ExpectedFinding>,
}

impl<'a, S: AssetSource> Auditor<'a, S> {
    pub fn new(config: &'a AuditConfig, source: &'a S) -> Self {
        Self { config, source }
    }

    /// Audit levels `1..=max_level` in ascending order.
    pub fn audit_all(&self) -> AuditReport {
        let levels: Vec<LevelReport> = (1..=self.config.max_level)
            .map(|level| self.audit_level(level))
            .collect();
        let summary = AuditSummary::from_levels(&levels);
        AuditReport {
            schema_version: REPORT_SCHEMA_VERSION,
            base_directory: self.config.base_directory.clone(),
            max_level: self.config.max_level,
            levels,
            summary,
        }
    }

    /// Audit one level. Never fails; I/O errors become [`LevelOutcome::Failed`].
    pub fn audit_level(&self, level: u32) -> LevelReport {
        let directory = self.config.level_path(level);
        let mut progress = ScanProgress::default();
        let outcome = match self.scan(level, &directory, &mut progress) {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = error_chain_message(&err);
                tracing::warn!(level, error = %message, "error checking level");
                LevelOutcome::Failed {
                    message,
                    entry_count: progress.entry_count,
                    expected: progress.expected,
                }
            }
        };
        LevelReport {
            level,
            directory,
            outcome,
        }
    }

    fn scan(
        &self,
        level: u32,
        directory: &Path,
        progress: &mut ScanProgress,
    ) -> Result<LevelOutcome> {
        if !self.source.exists(directory)? {
            tracing::debug!(level, directory = %directory.display(), "level directory not found");
            return Ok(LevelOutcome::DirectoryMissing);
        }

        let entries = self.source.list_dir(directory)?;
        let entry_count = entries.len();
        progress.entry_count = Some(entry_count);
        tracing::debug!(level, entry_count, "listed level directory");

        let expected_names = expand_all(&self.config.expected_patterns, level);
        for name in &expected_names {
            let found = entries.contains(name);
            let mut finding = ExpectedFinding {
                name: name.clone(),
                found,
                size_bytes: None,
                json_error: None,
            };
            if found {
                if let Err(err) = self.inspect_found(&directory.join(name), &mut finding) {
                    progress.expected.push(finding);
                    return Err(err);
                }
            }
            progress.expected.push(finding);
        }

        let unexpected = entries
            .into_iter()
            .filter(|entry| !expected_names.contains(entry))
            .collect();

        Ok(LevelOutcome::Scanned {
            entry_count,
            expected: std::mem::take(&mut progress.expected),
            unexpected,
        })
    }

    /// Fill in the size and, with `check_json`, the parse result of a found file.
    fn inspect_found(&self, path: &Path, finding: &mut ExpectedFinding) -> Result<()> {
        finding.size_bytes = Some(self.source.size_of(path)?);
        if self.config.check_json && is_json_name(&finding.name) {
            finding.json_error = self.json_error(path)?;
        }
        Ok(())
    }

    /// Read errors propagate as faults; parse errors are findings.
    fn json_error(&self, path: &Path) -> Result<Option<String>> {
        let bytes = self.source.read(path)?;
        Ok(serde_json::from_slice::<serde_json::Value>(&bytes)
            .err()
            .map(|err| err.to_string()))
    }
}

fn is_json_name(name: &str) -> bool {
    name.ends_with(".json")
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
