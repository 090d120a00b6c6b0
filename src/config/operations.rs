//! Config loading, validation, and environment overrides.

use super::model::Config;
use crate::error::{PagesnapError, Result};
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(PagesnapError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PagesnapError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| PagesnapError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            PagesnapError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `timeout` must be positive
    /// - `singlefile_binary` must be non-empty
    /// - `output_permissions` must be octal with no execute bits
    /// - `static_file_extensions` entries must be non-empty and have no leading dots
    pub fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            return Err(PagesnapError::UserError(
                "config validation failed: timeout must be greater than 0".to_string(),
            ));
        }

        if self.singlefile_binary.trim().is_empty() {
            return Err(PagesnapError::UserError(
                "config validation failed: singlefile_binary must be non-empty".to_string(),
            ));
        }

        let mode = self.output_mode()?;
        if mode & 0o111 != 0 {
            return Err(PagesnapError::UserError(format!(
                "config validation failed: output_permissions '{}' must not include execute bits",
                self.output_permissions
            )));
        }

        for ext in &self.static_file_extensions {
            if ext.is_empty() {
                return Err(PagesnapError::UserError(
                    "config validation failed: static_file_extensions entries must be non-empty"
                        .to_string(),
                ));
            }
            if ext.starts_with('.') {
                return Err(PagesnapError::UserError(format!(
                    "config validation failed: static_file_extensions entries must not have leading dots (found '{}'). Use '{}' instead.",
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        Ok(())
    }

    /// Parse `output_permissions` as an octal mode.
    pub fn output_mode(&self) -> Result<u32> {
        let raw = self.output_permissions.trim().trim_start_matches("0o");
        match u32::from_str_radix(raw, 8) {
            Ok(mode) if mode <= 0o7777 => Ok(mode),
            _ => Err(PagesnapError::UserError(format!(
                "config validation failed: output_permissions '{}' is not a valid octal mode",
                self.output_permissions
            ))),
        }
    }

    /// The default capture deadline.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Overlay values from the process environment.
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from an environment lookup, then re-validate.
    ///
    /// Recognized keys: `SAVE_SINGLEFILE`, `TIMEOUT`, `SINGLEFILE_BINARY`,
    /// `SINGLEFILE_VERSION`, `SINGLEFILE_ARGS`, `CHROME_BINARY`,
    /// `CHROME_VERSION`, `CHROME_HEADLESS`, `CHROME_SANDBOX`,
    /// `CHECK_SSL_VALIDITY`, `CHROME_USER_AGENT`, `RESOLUTION`,
    /// `CHROME_USER_DATA_DIR`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SAVE_SINGLEFILE") {
            self.save_singlefile = parse_bool("SAVE_SINGLEFILE", &v)?;
        }
        if let Some(v) = lookup("TIMEOUT") {
            self.timeout = v.trim().parse().map_err(|e| {
                PagesnapError::UserError(format!("invalid TIMEOUT '{}': {}", v, e))
            })?;
        }
        if let Some(v) = lookup("SINGLEFILE_BINARY") {
            self.singlefile_binary = v;
        }
        if let Some(v) = lookup("SINGLEFILE_VERSION") {
            self.singlefile_version = non_empty(v);
        }
        if let Some(v) = lookup("SINGLEFILE_ARGS") {
            self.singlefile_args = parse_list("SINGLEFILE_ARGS", &v)?;
        }

        let browser = &mut self.browser;
        if let Some(v) = lookup("CHROME_BINARY") {
            browser.chrome_binary = v;
        }
        if let Some(v) = lookup("CHROME_VERSION") {
            browser.chrome_version = non_empty(v);
        }
        if let Some(v) = lookup("CHROME_HEADLESS") {
            browser.headless = parse_bool("CHROME_HEADLESS", &v)?;
        }
        if let Some(v) = lookup("CHROME_SANDBOX") {
            browser.sandbox = parse_bool("CHROME_SANDBOX", &v)?;
        }
        if let Some(v) = lookup("CHECK_SSL_VALIDITY") {
            browser.check_ssl_validity = parse_bool("CHECK_SSL_VALIDITY", &v)?;
        }
        if let Some(v) = lookup("CHROME_USER_AGENT") {
            browser.user_agent = non_empty(v);
        }
        if let Some(v) = lookup("RESOLUTION") {
            browser.resolution = v;
        }
        if let Some(v) = lookup("CHROME_USER_DATA_DIR") {
            browser.user_data_dir = non_empty(v);
        }

        self.validate()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PagesnapError::UserError(format!(
            "invalid {} '{}': expected true/false",
            key, value
        ))),
    }
}

/// Parse a list value: a JSON array of strings, or shell words.
fn parse_list(key: &str, value: &str) -> Result<Vec<String>> {
    let trimmed = value.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| {
            PagesnapError::UserError(format!("invalid {} JSON list: {}", key, e))
        });
    }

    shell_words::split(trimmed).map_err(|e| {
        PagesnapError::UserError(format!(
            "failed to parse {} '{}': {}\nFix: check for unmatched quotes or invalid escape sequences.",
            key, value, e
        ))
    })
}
