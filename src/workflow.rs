//! Command runners.
//!
//! Each runner resolves its inputs, does one thing, and reports through stdout
//! so the CLI layer stays a thin dispatch.
use crate::audit::Auditor;
use crate::cli::{AuditArgs, ConfigArgs};
use crate::config::{config_stub, resolve_config};
use crate::report::{render_json, render_text};
use crate::source::DiskSource;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::process::ExitCode;

/// Exit status used by `--strict` when the audit has findings.
const FINDINGS_EXIT_CODE: u8 = 1;

pub fn run_audit(args: AuditArgs) -> Result<ExitCode> {
    let config = resolve_config(&args)?;
    let report = Auditor::new(&config, &DiskSource).audit_all();

    let rendered = if args.json {
        let mut json = render_json(&report)?;
        json.push('\n');
        json
    } else {
        render_text(&report)
    };
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("write audit report")?;
    stdout.flush().context("flush audit report")?;

    if args.strict && report.summary.has_findings() {
        tracing::debug!(summary = ?report.summary, "strict audit found problems");
        return Ok(ExitCode::from(FINDINGS_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    let stub = config_stub()?;
    let Some(out) = args.out else {
        println!("{stub}");
        return Ok(());
    };
    if out.exists() && !args.force {
        return Err(anyhow!(
            "config already exists at {} (use --force to overwrite)",
            out.display()
        ));
    }
    if let Some(parent) = out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&out, format!("{stub}\n")).with_context(|| format!("write {}", out.display()))?;
    println!("wrote {}", out.display());
    Ok(())
}
