//! Precondition gate: should a capture run at all?

use super::command::ARTIFACT_NAME;
use crate::config::Config;
use crate::target::{Target, is_static_file};
use std::path::Path;
use tracing::debug;

/// Decide whether SingleFile should run for `target`.
///
/// Static resources never need a browser snapshot, and an existing artifact
/// is kept unless `overwrite` is set. Otherwise the configured enable flag
/// decides.
pub fn should_capture(
    target: &Target,
    out_dir: Option<&Path>,
    overwrite: bool,
    config: &Config,
) -> bool {
    if is_static_file(&target.url, &config.static_file_extensions) {
        debug!(url = %target.url, "static file, skipping capture");
        return false;
    }

    let out_dir = target.out_dir(out_dir);
    if !overwrite && out_dir.join(ARTIFACT_NAME).exists() {
        debug!(out_dir = %out_dir.display(), "artifact already exists, skipping capture");
        return false;
    }

    config.save_singlefile
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn enabled(flag: bool) -> Config {
        Config {
            save_singlefile: flag,
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_dynamic_page_follows_enable_flag() {
        let temp_dir = TempDir::new().unwrap();
        let target = Target::new("https://example.com/article", temp_dir.path());

        assert!(should_capture(&target, None, false, &enabled(true)));
        assert!(!should_capture(&target, None, false, &enabled(false)));
    }

    #[test]
    fn test_existing_artifact_skips_without_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(ARTIFACT_NAME), "<html/>").unwrap();
        let target = Target::new("https://example.com/article", temp_dir.path());

        assert!(!should_capture(&target, None, false, &enabled(true)));
        assert!(!should_capture(&target, None, false, &enabled(false)));
    }

    #[test]
    fn test_overwrite_ignores_existing_artifact() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(ARTIFACT_NAME), "<html/>").unwrap();
        let target = Target::new("https://example.com/article", temp_dir.path());

        assert!(should_capture(&target, None, true, &enabled(true)));
        assert!(!should_capture(&target, None, true, &enabled(false)));
    }

    #[test]
    fn test_static_file_always_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let target = Target::new("https://example.com/paper.pdf", temp_dir.path());

        assert!(!should_capture(&target, None, false, &enabled(true)));
        assert!(!should_capture(&target, None, true, &enabled(true)));
    }

    #[test]
    fn test_out_dir_override_is_checked_instead_of_link_dir() {
        let link_dir = TempDir::new().unwrap();
        let other_dir = TempDir::new().unwrap();
        std::fs::write(other_dir.path().join(ARTIFACT_NAME), "<html/>").unwrap();
        let target = Target::new("https://example.com/article", link_dir.path());

        assert!(should_capture(&target, None, false, &enabled(true)));
        assert!(!should_capture(
            &target,
            Some(other_dir.path()),
            false,
            &enabled(true)
        ));
    }
}
