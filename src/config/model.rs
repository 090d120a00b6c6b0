//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the capture step.
///
/// This struct represents the contents of an optional `pagesnap.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Capture settings
    // =========================================================================
    /// Whether SingleFile capture is enabled at all.
    #[serde(default = "default_true")]
    pub save_singlefile: bool,

    /// Default deadline for one capture, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    // =========================================================================
    // Tool settings
    // =========================================================================
    /// Path or name of the SingleFile CLI binary.
    #[serde(default = "default_singlefile_binary")]
    pub singlefile_binary: String,

    /// Version string recorded in results. Detected via `--version` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singlefile_version: Option<String>,

    /// Extra SingleFile options. These take precedence over generated options
    /// with the same name.
    #[serde(default)]
    pub singlefile_args: Vec<String>,

    // =========================================================================
    // Output settings
    // =========================================================================
    /// Octal permission bits applied to the artifact (e.g. "644").
    #[serde(default = "default_output_permissions")]
    pub output_permissions: String,

    /// URL extensions that mark a target as a static file (no leading dots).
    #[serde(default = "default_static_file_extensions")]
    pub static_file_extensions: Vec<String>,

    // =========================================================================
    // Browser settings
    // =========================================================================
    #[serde(default)]
    pub browser: BrowserConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_singlefile: default_true(),
            timeout: default_timeout(),
            singlefile_binary: default_singlefile_binary(),
            singlefile_version: None,
            singlefile_args: Vec::new(),
            output_permissions: default_output_permissions(),
            static_file_extensions: default_static_file_extensions(),
            browser: BrowserConfig::default(),
        }
    }
}
