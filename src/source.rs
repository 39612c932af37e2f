//! Read-only filesystem access used by the auditor.
//!
//! The auditor only depends on [`AssetSource`], so tests can substitute an
//! in-memory tree or inject I/O faults without touching the disk.
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Narrow read interface over a leveled asset tree.
pub trait AssetSource {
    /// Whether anything exists at `path`; errors when that cannot be determined.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Names of every entry directly under `dir`.
    fn list_dir(&self, dir: &Path) -> Result<Vec<String>>;

    /// Size of the entry at `path` in bytes.
    fn size_of(&self, path: &Path) -> Result<u64>;

    /// Full contents of the file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

/// [`AssetSource`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSource;

impl AssetSource for DiskSource {
    fn exists(&self, path: &Path) -> Result<bool> {
        path.try_exists()
            .with_context(|| format!("check {}", path.display()))
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
            let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn size_of(&self, path: &Path) -> Result<u64> {
        let metadata =
            fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
        Ok(metadata.len())
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("read {}", path.display()))
    }
}
