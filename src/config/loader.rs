use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/storefront-session/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("storefront-session").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Gate poll interval is non-zero and no longer than the gate timeout
    /// - Alert tick, lifetimes and event capacity are non-zero
    /// - Redirect paths are absolute
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gate.poll_interval_ms == 0 {
            return Err(invalid("gate.poll_interval_ms must be greater than zero"));
        }

        if self.gate.poll_interval_ms > self.gate.timeout_ms {
            return Err(invalid(format!(
                "gate.poll_interval_ms ({}) exceeds gate.timeout_ms ({})",
                self.gate.poll_interval_ms, self.gate.timeout_ms
            )));
        }

        if self.alerts.tick_ms == 0 {
            return Err(invalid("alerts.tick_ms must be greater than zero"));
        }

        if self.alerts.event_capacity == 0 {
            return Err(invalid("alerts.event_capacity must be greater than zero"));
        }

        let lifetimes = [
            ("success_ms", self.alerts.success_ms),
            ("info_ms", self.alerts.info_ms),
            ("warning_ms", self.alerts.warning_ms),
            ("error_ms", self.alerts.error_ms),
        ];
        if let Some((name, _)) = lifetimes.iter().find(|(_, ms)| *ms == 0) {
            return Err(invalid(format!("alerts.{} must be greater than zero", name)));
        }

        for (name, path) in [
            ("login_path", &self.guard.login_path),
            ("forbidden_path", &self.guard.forbidden_path),
        ] {
            if !path.starts_with('/') {
                return Err(invalid(format!(
                    "guard.{} must start with '/', got '{}'",
                    name, path
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
