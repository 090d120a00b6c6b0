use crate::config::Config;
use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script named `name` into `dir`.
#[cfg(unix)]
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A fake SingleFile: prints `lines`, writes the artifact named by its last
/// argument when `write_artifact` is set, then exits with `exit_code`.
#[cfg(unix)]
pub(crate) fn fake_singlefile(
    dir: &Path,
    lines: &[&str],
    write_artifact: bool,
    exit_code: i32,
) -> PathBuf {
    let mut body = String::new();
    for line in lines {
        body.push_str(&format!("echo '{}'\n", line));
    }
    if write_artifact {
        body.push_str("for last; do :; done\necho '<html>snapshot</html>' > \"$last\"\n");
    }
    body.push_str(&format!("exit {}", exit_code));
    write_script(dir, "single-file", &body)
}

/// Config pointing at a fake tool, with a version pinned so nothing probes it.
pub(crate) fn config_for(binary: &Path) -> Config {
    Config {
        singlefile_binary: binary.to_string_lossy().to_string(),
        singlefile_version: Some("1.1.54".to_string()),
        ..Default::default()
    }
}
