//! Atomic file writes for result records.
//!
//! A result file handed to the indexing layer must never be observed half
//! written. Writes go to `.{filename}.tmp` in the same directory, are synced,
//! then renamed over the target. On POSIX `rename()` is atomic when source and
//! destination share a filesystem.

use crate::error::{PagesnapError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            PagesnapError::IoError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PagesnapError::IoError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e
        ))
    })?;

    // Persist the directory entry as well.
    #[cfg(unix)]
    {
        if let Some(parent) = path.parent()
            && let Ok(dir) = File::open(parent)
        {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PagesnapError::UserError("invalid file path".to_string()))?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        PagesnapError::IoError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        PagesnapError::IoError(format!("failed to write to temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        PagesnapError::IoError(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}
