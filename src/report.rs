//! Rendering for audit reports.
//!
//! The text form is line oriented and stable so it can be diffed between runs;
//! the JSON form is the serialized [`AuditReport`].
use crate::audit::{AuditReport, AuditSummary, ExpectedFinding, LevelOutcome, LevelReport};
use anyhow::{Context, Result};

pub const START_BANNER: &str = "Starting script - Verifying game assets for consistent naming...";
pub const COMPLETE_BANNER: &str = "Verification complete!";

/// Bytes as kilobytes with one decimal place, e.g. `1536 -> "1.5 KB"`.
/// Ties round up: `256 -> "0.3 KB"`.
pub fn format_kb(bytes: u64) -> String {
    let tenths = (u128::from(bytes) * 10 + 512) / 1024;
    format!("{}.{} KB", tenths / 10, tenths % 10)
}

pub fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();
    push_line(&mut out, START_BANNER);
    for level in &report.levels {
        render_level(&mut out, level);
    }
    push_line(&mut out, "");
    push_line(&mut out, COMPLETE_BANNER);
    push_line(&mut out, &summary_line(&report.summary));
    out
}

pub fn render_json(report: &AuditReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize audit report")
}

pub fn summary_line(summary: &AuditSummary) -> String {
    format!(
        "Summary: levels={} missing_dirs={} missing_files={} unexpected_files={} invalid_json={} errors={}",
        summary.levels,
        summary.missing_dirs,
        summary.missing_files,
        summary.unexpected_files,
        summary.invalid_json,
        summary.errors
    )
}

fn render_level(out: &mut String, report: &LevelReport) {
    push_line(out, "");
    push_line(out, &format!("Checking level {}:", report.level));
    match &report.outcome {
        LevelOutcome::DirectoryMissing => {
            push_line(
                out,
                &format!(
                    "  - Level directory {} not found",
                    report.directory.display()
                ),
            );
        }
        LevelOutcome::Scanned {
            entry_count,
            expected,
            unexpected,
        } => {
            render_findings(out, Some(*entry_count), expected);
            if !unexpected.is_empty() {
                push_line(out, "  - Unexpected files:");
                for name in unexpected {
                    push_line(out, &format!("    * {name}"));
                }
            }
        }
        LevelOutcome::Failed {
            message,
            entry_count,
            expected,
        } => {
            render_findings(out, *entry_count, expected);
            push_line(
                out,
                &format!("  Error checking level {}: {message}", report.level),
            );
        }
    }
}

fn render_findings(out: &mut String, entry_count: Option<usize>, expected: &[ExpectedFinding]) {
    if let Some(count) = entry_count {
        push_line(out, &format!("  Found {count} files"));
    }
    for finding in expected {
        let status = if finding.found {
            "✓ FOUND"
        } else {
            "✗ MISSING"
        };
        push_line(out, &format!("  - {}: {status}", finding.name));
        if let Some(size) = finding.size_bytes {
            push_line(out, &format!("    Size: {}", format_kb(size)));
        }
        if let Some(error) = &finding.json_error {
            push_line(out, &format!("    Invalid JSON: {error}"));
        }
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
