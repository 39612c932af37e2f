//! CLI argument parsing for the level asset audit.
//!
//! The CLI only collects overrides; defaults and validation live in
//! [`crate::config`] so the same audit can be driven from a config file alone.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "level-audit",
    version,
    about = "Verify per-level game asset directories against expected file names",
    after_help = "Commands:\n  audit                 Audit every level directory and print a report\n  config                Print or write the default audit config\n\nExamples:\n  level-audit audit\n  level-audit audit --base-dir assets/images --max-level 8\n  level-audit audit --config audit.json --check-json --strict\n  level-audit audit --json > report.json\n  level-audit config --out audit.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Audit(AuditArgs),
    Config(ConfigArgs),
}

/// Audit command inputs. Every option overrides the config file value.
#[derive(Parser, Debug, Default)]
#[command(about = "Audit level asset directories")]
pub struct AuditArgs {
    /// JSON config file (defaults apply to any field it omits)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory holding one subdirectory per level
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Highest level to audit (levels start at 1)
    #[arg(long, value_name = "N")]
    pub max_level: Option<u32>,

    /// Expected file template; repeat to replace the whole list
    #[arg(long = "pattern", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Level subdirectory template, e.g. "level{level}"
    #[arg(long, value_name = "PATTERN")]
    pub level_dir: Option<String>,

    /// Parse found .json files and report the ones that are invalid
    #[arg(long)]
    pub check_json: bool,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 when the audit has any finding
    #[arg(long)]
    pub strict: bool,

    /// Emit debug logging to stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Config command inputs.
#[derive(Parser, Debug)]
#[command(about = "Print or write the default audit config")]
pub struct ConfigArgs {
    /// Write the config here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long, requires = "out")]
    pub force: bool,
}
