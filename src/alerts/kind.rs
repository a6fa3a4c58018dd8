use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an alert, which picks its default lifetime and visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AlertKind {
    Success,
    Warning,
    Error,
    /// Neutral message. Also the fallback for unrecognised kind names.
    #[default]
    Info,
}

impl AlertKind {
    pub const ALL: [AlertKind; 4] = [
        AlertKind::Success,
        AlertKind::Warning,
        AlertKind::Error,
        AlertKind::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Warning => "warning",
            AlertKind::Error => "error",
            AlertKind::Info => "info",
        }
    }

    /// Parses a kind name, case-insensitively.
    ///
    /// Never fails: anything unrecognised becomes [`AlertKind::Info`], so a
    /// typo at a call site still reaches the user.
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => AlertKind::Success,
            "warning" | "warn" => AlertKind::Warning,
            "error" | "danger" => AlertKind::Error,
            _ => AlertKind::Info,
        }
    }
}

impl From<&str> for AlertKind {
    fn from(name: &str) -> Self {
        Self::parse_lossy(name)
    }
}

impl From<String> for AlertKind {
    fn from(name: String) -> Self {
        Self::parse_lossy(&name)
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_round_trip_through_display() {
        for kind in AlertKind::ALL {
            assert_eq!(AlertKind::parse_lossy(&kind.to_string()), kind);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(AlertKind::parse_lossy("ERROR"), AlertKind::Error);
        assert_eq!(AlertKind::parse_lossy(" Warning "), AlertKind::Warning);
    }

    #[test]
    fn unknown_kind_falls_back_to_info() {
        assert_eq!(AlertKind::parse_lossy("critical"), AlertKind::Info);
        assert_eq!(AlertKind::from(""), AlertKind::Info);
    }

    #[test]
    fn deserialize_falls_back_like_parse() {
        let danger: AlertKind = serde_json::from_str("\"danger\"").unwrap();
        let critical: AlertKind = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(danger, AlertKind::Error);
        assert_eq!(critical, AlertKind::Info);
        assert_eq!(serde_json::to_string(&AlertKind::Warning).unwrap(), "\"warning\"");
    }

    #[test]
    fn bootstrap_style_aliases_are_accepted() {
        assert_eq!(AlertKind::parse_lossy("danger"), AlertKind::Error);
        assert_eq!(AlertKind::parse_lossy("warn"), AlertKind::Warning);
    }
}
