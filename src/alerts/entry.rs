use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use super::kind::AlertKind;

/// Identifier of an alert, stable for the entry's lifetime.
///
/// Generated as a v4 UUID unless the caller supplies its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(String);

impl AlertId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for AlertId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AlertId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live alert as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    id: AlertId,
    kind: AlertKind,
    message: String,
    #[serde(rename = "timeout_ms", serialize_with = "serialize_millis")]
    timeout: Duration,
    remaining_percent: f32,
}

fn serialize_millis<S: Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
}

impl AlertEntry {
    pub(crate) fn new(id: AlertId, kind: AlertKind, message: String, timeout: Duration) -> Self {
        Self {
            id,
            kind,
            message,
            timeout,
            remaining_percent: 100.0,
        }
    }

    pub fn id(&self) -> &AlertId {
        &self.id
    }

    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Total lifetime of the entry.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Share of the lifetime still left, from 100 down to 0.
    pub fn remaining_percent(&self) -> f32 {
        self.remaining_percent
    }

    /// Recomputes the remaining share after `elapsed` and reports whether the
    /// entry has run out.
    pub(crate) fn advance(&mut self, elapsed: Duration) -> bool {
        let total = self.timeout.as_secs_f64();
        let spent = elapsed.as_secs_f64();
        if total == 0.0 || spent >= total {
            self.remaining_percent = 0.0;
            return true;
        }
        let remaining = (100.0 * (1.0 - spent / total)) as f32;
        // Never increase, even if the clock reports a smaller elapsed time.
        self.remaining_percent = remaining.clamp(0.0, self.remaining_percent);
        false
    }
}
