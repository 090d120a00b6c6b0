//! Locating the capture tool and reading its version.

use crate::capture::supervisor;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Deadline for `<binary> --version`.
pub const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolve a binary name or path to an absolute executable path.
///
/// Names containing a path separator are checked as-is; bare names are
/// searched for on `PATH`. Relative hits are made absolute against the
/// current directory, since the tool is spawned from the output directory.
pub fn resolve_binary(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(name);
        return is_executable(&path).then(|| absolute(path));
    }

    let path_var = std::env::var_os("PATH")?;
    resolve_in(name, &path_var)
}

/// Search the directories of a `PATH`-style value for `name`.
pub fn resolve_in(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .map(absolute)
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Ask the binary for its version: the first non-empty output line of
/// `<binary> --version`, or `None` if it cannot run or exits non-zero.
pub fn detect_version(binary: &str) -> Option<String> {
    let argv = vec![binary.to_string(), "--version".to_string()];
    let cwd = std::env::temp_dir();

    match supervisor::run(&argv, &cwd, VERSION_TIMEOUT) {
        Ok(outcome) if outcome.exit_code == 0 => {
            let text = String::from_utf8_lossy(&outcome.output);
            text.lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
        }
        Ok(outcome) => {
            debug!(binary, exit_code = outcome.exit_code, "version probe failed");
            None
        }
        Err(fault) => {
            debug!(binary, error = %fault, "version probe failed");
            None
        }
    }
}
