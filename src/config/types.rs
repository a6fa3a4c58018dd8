use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::alerts::AlertKind;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gate: GateConfig,
    pub alerts: AlertConfig,
    pub guard: GuardConfig,
}

/// Timing for the session readiness gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Total time a guard waits for the session before giving up.
    pub timeout_ms: u64,
    /// Delay between predicate checks after the refresh completed.
    pub poll_interval_ms: u64,
}

impl GateConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            poll_interval_ms: 100,
        }
    }
}

/// Countdown settings and per-kind lifetimes for alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Countdown granularity.
    pub tick_ms: u64,
    pub success_ms: u64,
    pub info_ms: u64,
    pub warning_ms: u64,
    pub error_ms: u64,
    /// Buffered events per subscriber before lagging ones start missing events.
    pub event_capacity: usize,
}

impl AlertConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Lifetime used when `show` is called without an explicit timeout.
    pub fn default_timeout(&self, kind: AlertKind) -> Duration {
        let ms = match kind {
            AlertKind::Success => self.success_ms,
            AlertKind::Info => self.info_ms,
            AlertKind::Warning => self.warning_ms,
            AlertKind::Error => self.error_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            success_ms: 3000,
            info_ms: 3000,
            warning_ms: 5000,
            error_ms: 5000,
            event_capacity: 64,
        }
    }
}

/// Redirect targets used by the route guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where unauthenticated visitors are sent.
    pub login_path: String,
    /// Where authenticated users lacking the required role are sent.
    pub forbidden_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            forbidden_path: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeouts_per_kind() {
        let alerts = AlertConfig::default();
        assert_eq!(alerts.default_timeout(AlertKind::Success), Duration::from_secs(3));
        assert_eq!(alerts.default_timeout(AlertKind::Info), Duration::from_secs(3));
        assert_eq!(alerts.default_timeout(AlertKind::Warning), Duration::from_secs(5));
        assert_eq!(alerts.default_timeout(AlertKind::Error), Duration::from_secs(5));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[gate]\ntimeout_ms = 1200\n").unwrap();
        assert_eq!(config.gate.timeout_ms, 1200);
        assert_eq!(config.gate.poll_interval_ms, 100);
        assert_eq!(config.alerts, AlertConfig::default());
        assert_eq!(config.guard.login_path, "/login");
    }
}
