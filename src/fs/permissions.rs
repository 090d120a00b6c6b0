//! Permission normalization for capture artifacts.
//!
//! Artifacts written by the capture tool inherit whatever umask the tool ran
//! under. On success they are reset to the configured mode so archives stay
//! readable and never executable.

use crate::error::{PagesnapError, Result};
use std::path::Path;

/// Set the permission bits of `path` to `mode`.
///
/// No-op on platforms without Unix permission bits.
#[cfg(unix)]
pub fn normalize_permissions<P: AsRef<Path>>(path: P, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let path = path.as_ref();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
        PagesnapError::IoError(format!(
            "failed to set permissions {:o} on '{}': {}",
            mode,
            path.display(),
            e
        ))
    })
}

#[cfg(not(unix))]
pub fn normalize_permissions<P: AsRef<Path>>(path: P, _mode: u32) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        Ok(())
    } else {
        Err(PagesnapError::IoError(format!(
            "cannot normalize permissions: '{}' does not exist",
            path.display()
        )))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_strips_execute_bits() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("singlefile.html");
        std::fs::write(&path, "<html></html>").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o777)).unwrap();

        normalize_permissions(&path, 0o644).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o644);
    }

    #[test]
    fn test_normalize_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = normalize_permissions(temp_dir.path().join("missing.html"), 0o644).unwrap_err();
        assert!(matches!(err, PagesnapError::IoError(_)));
    }
}
