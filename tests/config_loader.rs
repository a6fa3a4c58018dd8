use std::fs;

use storefront_session::config::{Config, ConfigError};
use storefront_session::gate::ReadinessCheck;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_full_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[gate]
timeout_ms = 3000
poll_interval_ms = 250

[alerts]
tick_ms = 20
success_ms = 1500
info_ms = 2000
warning_ms = 4000
error_ms = 9000
event_capacity = 16

[guard]
login_path = "/signin"
forbidden_path = "/dashboard"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.gate.timeout_ms, 3000);
    assert_eq!(config.alerts.error_ms, 9000);
    assert_eq!(config.guard.login_path, "/signin");

    let check = ReadinessCheck::from(&config.gate);
    assert_eq!(check.poll_interval().as_millis(), 250);
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "invalid { toml }");

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_invalid_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[alerts]\ntick_ms = 0\n");

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("tick_ms"));
}

#[test]
fn test_config_path_is_namespaced() {
    let path = Config::config_path();
    assert!(path.ends_with("storefront-session/config.toml"));
}
