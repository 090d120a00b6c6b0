//! Shared browser argument generation.
//!
//! Builds the Chrome/Chromium command line used by every browser-driven
//! extractor. SingleFile receives these flags (minus the binary) as its
//! `--browser-args` JSON blob.

use crate::config::BrowserConfig;
use regex::Regex;
use std::sync::LazyLock;

/// First Chrome major version that understands `--headless=new`.
const NEW_HEADLESS_MIN_MAJOR: u32 = 111;

/// Flags for running without the sandbox (typically inside a container,
/// where GPU support and /dev/shm are limited).
const NO_SANDBOX_FLAGS: &[&str] = &[
    "--no-sandbox",
    "--no-zygote",
    "--disable-dev-shm-usage",
    "--disable-software-rasterizer",
    "--run-all-compositor-stages-before-draw",
    "--hide-scrollbars",
    "--autoplay-policy=no-user-gesture-required",
    "--no-first-run",
    "--use-fake-ui-for-media-stream",
    "--use-fake-device-for-media-stream",
    "--disable-sync",
];

static CHROME_MAJOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(\d+)\.\d").expect("Invalid chrome version regex"));

/// Per-call overrides layered over [`BrowserConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserArgOverrides {
    /// Replaces `chrome_timeout`. `Some(0)` suppresses the `--timeout` flag.
    pub timeout: Option<u64>,
}

/// Build the browser command line: the binary followed by its flags.
pub fn browser_args(config: &BrowserConfig, overrides: BrowserArgOverrides) -> Vec<String> {
    let mut args = vec![config.chrome_binary.clone()];

    if config.headless {
        let major = config.chrome_version.as_deref().and_then(chrome_major_version);
        match major {
            Some(major) if major >= NEW_HEADLESS_MIN_MAJOR => args.push("--headless=new".into()),
            _ => args.push("--headless".into()),
        }
    }

    if !config.sandbox {
        args.extend(NO_SANDBOX_FLAGS.iter().map(|f| f.to_string()));
    }

    if !config.check_ssl_validity {
        args.push("--disable-web-security".into());
        args.push("--ignore-certificate-errors".into());
    }

    if let Some(ua) = config.user_agent.as_deref().filter(|ua| !ua.is_empty()) {
        args.push(format!("--user-agent={}", ua));
    }

    if !config.resolution.is_empty() {
        args.push(format!("--window-size={}", config.resolution));
    }

    let timeout = overrides.timeout.unwrap_or(config.chrome_timeout);
    if timeout > 0 {
        args.push(format!("--timeout={}", timeout.saturating_mul(1000)));
    }

    if let Some(dir) = config.user_data_dir.as_deref().filter(|d| !d.is_empty()) {
        args.push(format!("--user-data-dir={}", dir));
    }

    args
}

/// Extract the major version from a browser version string such as
/// `"Chromium 120.0.6099.71 snap"`.
pub fn chrome_major_version(version: &str) -> Option<u32> {
    CHROME_MAJOR_REGEX
        .captures(version)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
