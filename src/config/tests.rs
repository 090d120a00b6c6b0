//! Tests for config functionality.

use crate::config::types::default_static_file_extensions;
use crate::config::{BrowserConfig, Config};
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.save_singlefile);
    assert_eq!(config.timeout, 60);
    assert_eq!(config.singlefile_binary, "single-file");
    assert!(config.singlefile_version.is_none());
    assert!(config.singlefile_args.is_empty());
    assert_eq!(config.output_permissions, "644");
    assert_eq!(config.static_file_extensions, default_static_file_extensions());
    assert_eq!(config.browser, BrowserConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
timeout: 120
singlefile_args:
  - "--browser-wait-until=networkidle0"
browser:
  sandbox: false
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.timeout, 120);
    assert_eq!(
        config.singlefile_args,
        vec!["--browser-wait-until=networkidle0".to_string()]
    );
    assert!(!config.browser.sandbox);

    // Unspecified values should use defaults
    assert!(config.browser.headless);
    assert_eq!(config.browser.chrome_binary, "chromium");
    assert_eq!(config.singlefile_binary, "single-file");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
timeout: 30
future_option: 42
browser:
  also_unknown: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.timeout, 30);
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let err = Config::from_yaml("timeout: [not a number").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_zero_timeout_rejected() {
    let err = Config::from_yaml("timeout: 0").unwrap_err();
    assert!(err.to_string().contains("timeout must be greater than 0"));
}

#[test]
fn test_empty_binary_rejected() {
    let err = Config::from_yaml("singlefile_binary: '  '").unwrap_err();
    assert!(err.to_string().contains("singlefile_binary"));
}

#[test]
fn test_output_permissions_parsing() {
    let mut config = Config::default();
    assert_eq!(config.output_mode().unwrap(), 0o644);

    config.output_permissions = "0o600".to_string();
    assert_eq!(config.output_mode().unwrap(), 0o600);

    config.output_permissions = "rw-r--r--".to_string();
    assert!(config.output_mode().is_err());
}

#[test]
fn test_executable_permissions_rejected() {
    let err = Config::from_yaml("output_permissions: '755'").unwrap_err();
    assert!(err.to_string().contains("execute bits"));
}

#[test]
fn test_leading_dot_extension_rejected() {
    let yaml = r#"
static_file_extensions:
  - ".pdf"
"#;
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("Use 'pdf' instead"));
}

#[test]
fn test_yaml_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.singlefile_version = Some("1.1.54".to_string());
    config.browser.user_agent = Some("pagesnap/0.1".to_string());

    let yaml = config.to_yaml().unwrap();
    let parsed = Config::from_yaml(&yaml).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pagesnap.yaml");
    std::fs::write(&path, "save_singlefile: false\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert!(!config.save_singlefile);
}

#[test]
fn test_load_missing_file_is_user_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(temp_dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_timeout_duration() {
    let config = Config {
        timeout: 90,
        ..Default::default()
    };
    assert_eq!(config.timeout_duration(), Duration::from_secs(90));
}

#[test]
fn test_apply_env_overrides() {
    let vars = env(&[
        ("SAVE_SINGLEFILE", "False"),
        ("TIMEOUT", "15"),
        ("SINGLEFILE_BINARY", "/opt/bin/single-file"),
        ("SINGLEFILE_VERSION", "1.1.54"),
        ("CHROME_BINARY", "/usr/bin/google-chrome"),
        ("CHROME_SANDBOX", "no"),
        ("CHECK_SSL_VALIDITY", "0"),
        ("CHROME_USER_AGENT", "Mozilla/5.0 pagesnap"),
        ("RESOLUTION", "1920,1080"),
    ]);

    let mut config = Config::default();
    config.apply_env(|k| vars.get(k).cloned()).unwrap();

    assert!(!config.save_singlefile);
    assert_eq!(config.timeout, 15);
    assert_eq!(config.singlefile_binary, "/opt/bin/single-file");
    assert_eq!(config.singlefile_version.as_deref(), Some("1.1.54"));
    assert_eq!(config.browser.chrome_binary, "/usr/bin/google-chrome");
    assert!(!config.browser.sandbox);
    assert!(!config.browser.check_ssl_validity);
    assert_eq!(
        config.browser.user_agent.as_deref(),
        Some("Mozilla/5.0 pagesnap")
    );
    assert_eq!(config.browser.resolution, "1920,1080");
    // Untouched keys keep their values
    assert!(config.browser.headless);
}

#[test]
fn test_apply_env_args_as_json_list() {
    let vars = env(&[(
        "SINGLEFILE_ARGS",
        r#"["--browser-wait-until=load", "--block-scripts=true"]"#,
    )]);

    let mut config = Config::default();
    config.apply_env(|k| vars.get(k).cloned()).unwrap();
    assert_eq!(
        config.singlefile_args,
        vec![
            "--browser-wait-until=load".to_string(),
            "--block-scripts=true".to_string()
        ]
    );
}

#[test]
fn test_apply_env_args_as_shell_words() {
    let vars = env(&[("SINGLEFILE_ARGS", "--load-deferred-images=false '--user-agent=a b'")]);

    let mut config = Config::default();
    config.apply_env(|k| vars.get(k).cloned()).unwrap();
    assert_eq!(
        config.singlefile_args,
        vec![
            "--load-deferred-images=false".to_string(),
            "--user-agent=a b".to_string()
        ]
    );
}

#[test]
fn test_apply_env_invalid_values() {
    let mut config = Config::default();
    let err = config
        .apply_env(|k| (k == "TIMEOUT").then(|| "soon".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("invalid TIMEOUT"));

    let mut config = Config::default();
    let err = config
        .apply_env(|k| (k == "CHROME_HEADLESS").then(|| "maybe".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("CHROME_HEADLESS"));

    let mut config = Config::default();
    let err = config
        .apply_env(|k| (k == "TIMEOUT").then(|| "0".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("timeout must be greater than 0"));
}

#[test]
fn test_apply_env_blank_optional_clears_value() {
    let mut config = Config::default();
    config.singlefile_version = Some("1.0".to_string());
    config
        .apply_env(|k| (k == "SINGLEFILE_VERSION").then(String::new))
        .unwrap();
    assert!(config.singlefile_version.is_none());
}
