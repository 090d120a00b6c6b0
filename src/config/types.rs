//! Configuration types and defaults for pagesnap.
//!
//! This module defines the browser settings block, constants, and default
//! value functions used by the Config struct.

use serde::{Deserialize, Serialize};

/// Settings for the headless browser that SingleFile drives.
///
/// These feed the shared browser argument helper
/// ([`browser_args`](crate::capture::browser_args)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Path or name of the Chrome/Chromium binary.
    #[serde(default = "default_chrome_binary")]
    pub chrome_binary: String,

    /// Version string reported by the browser (e.g. "Chromium 120.0.6099.71").
    /// Used to pick the headless flag flavor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_version: Option<String>,

    /// Run the browser headless.
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Keep the browser sandbox enabled. Disable inside containers.
    #[serde(default = "default_true")]
    pub sandbox: bool,

    /// Reject invalid TLS certificates.
    #[serde(default = "default_true")]
    pub check_ssl_validity: bool,

    /// Override the browser user agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Window size as "width,height" (empty disables the flag).
    #[serde(default = "default_resolution")]
    pub resolution: String,

    /// Browser profile directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data_dir: Option<String>,

    /// Browser-level timeout in seconds (0 disables the flag).
    #[serde(default)]
    pub chrome_timeout: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_binary: default_chrome_binary(),
            chrome_version: None,
            headless: true,
            sandbox: true,
            check_ssl_validity: true,
            user_agent: None,
            resolution: default_resolution(),
            user_data_dir: None,
            chrome_timeout: 0,
        }
    }
}

/// Default extensions treated as static, already-final resources.
pub fn default_static_file_extensions() -> Vec<String> {
    [
        // documents
        "pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx", "odt", "ods", "odp", "rtf", "txt",
        "csv", "epub", "djvu", // images
        "gif", "jpeg", "jpg", "png", "webp", "svg", "bmp", "ico", "tif", "tiff", "heic",
        // audio / video
        "mp3", "m4a", "ogg", "flac", "wav", "aac", "mp4", "m4v", "mov", "webm", "mkv", "avi",
        "flv", "wmv", // archives and binaries
        "zip", "tar", "gz", "tgz", "bz2", "xz", "7z", "rar", "iso", "dmg", "exe", "apk", "deb",
        "rpm", // data
        "json", "xml", "rss", "atom",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// Default value functions for serde
pub(crate) fn default_timeout() -> u64 {
    60
}
pub(crate) fn default_singlefile_binary() -> String {
    "single-file".to_string()
}
pub(crate) fn default_output_permissions() -> String {
    "644".to_string()
}
pub(crate) fn default_chrome_binary() -> String {
    "chromium".to_string()
}
pub(crate) fn default_resolution() -> String {
    "1440,2000".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
