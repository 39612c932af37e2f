//! Shared test infrastructure for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const DEFAULT_PATTERNS: [&str; 6] = [
    "background{level}.png",
    "chibi_girl{level}.png",
    "victory_background{level}.png",
    "level_config.json",
    "block_layout.json",
    "available_bombs.json",
];

/// A throwaway asset tree laid out as `<root>/assets/images/level<N>/`.
pub struct AssetTree {
    pub dir: TempDir,
}

/// Captured result of one `level-audit` invocation.
#[derive(Debug)]
pub struct RunResult {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Default for AssetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp asset tree"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn level_dir(&self, level: u32) -> PathBuf {
        self.root()
            .join("assets/images")
            .join(format!("level{level}"))
    }

    /// Create every default expected file for `level`, each `size` bytes.
    pub fn complete_level(&self, level: u32, size: usize) {
        for pattern in DEFAULT_PATTERNS {
            let name = pattern.replacen("{level}", &level.to_string(), 1);
            self.write(level, &name, &vec![b'x'; size]);
        }
    }

    pub fn write(&self, level: u32, name: &str, contents: &[u8]) {
        let dir = self.level_dir(level);
        std::fs::create_dir_all(&dir).expect("create level dir");
        std::fs::write(dir.join(name), contents).expect("write asset");
    }

    pub fn remove(&self, level: u32, name: &str) {
        std::fs::remove_file(self.level_dir(level).join(name)).expect("remove asset");
    }

    /// Run `level-audit` with the tree root as working directory.
    pub fn run(&self, args: &[&str]) -> RunResult {
        run_in(self.root(), args)
    }
}

pub fn run_in(cwd: &Path, args: &[&str]) -> RunResult {
    let output: Output = Command::new(env!("CARGO_BIN_EXE_level-audit"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("run level-audit");
    RunResult {
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Split a text report into its per-level blocks, keyed by level number.
pub fn level_blocks(stdout: &str) -> Vec<(u32, Vec<String>)> {
    let mut blocks: Vec<(u32, Vec<String>)> = Vec::new();
    for line in stdout.lines() {
        if let Some(rest) = line.strip_prefix("Checking level ") {
            let level = rest
                .trim_end_matches(':')
                .parse()
                .expect("level number in header");
            blocks.push((level, Vec::new()));
        } else if line.is_empty() || line.starts_with("Verification complete") {
            continue;
        } else if let Some((_, lines)) = blocks.last_mut() {
            if line.starts_with("  ") {
                lines.push(line.to_string());
            }
        }
    }
    blocks
}
