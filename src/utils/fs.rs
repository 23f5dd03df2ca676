//! Atomic file operations.
//!
//! All writes in this crate funnel through [`atomic_write`]: content lands in
//! a temporary file next to the target and becomes visible through a single
//! `rename`. A reader at any moment sees either the complete old file or the
//! complete new file; a crash mid-write leaves the target untouched.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Ensures a directory exists, creating it and all parents if necessary.
///
/// Returns an error if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!(
            "Path exists but is not a directory: {}",
            path.display()
        ));
    }
    Ok(())
}

/// Atomically writes a string to a file. See [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Parent directories are created if missing.
/// 2. Content is written to `<name>.<pid>.tmp` in the target directory and
///    synced to disk. The pid qualifier keeps concurrent processes from
///    clobbering each other's temp files.
/// 3. A single `rename` publishes the new content.
///
/// On failure the temporary file is removed on a best-effort basis and the
/// original error is returned; cleanup failure is swallowed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    let temp_path = temp_path_for(path);

    let write_result = (|| -> Result<()> {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;
        file.sync_all().context("Failed to sync file to disk")?;
        Ok(())
    })();

    let rename_result = write_result.and_then(|()| {
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))
    });

    if rename_result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    rename_result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    path.with_file_name(format!("{file_name}.{}.tmp", std::process::id()))
}
