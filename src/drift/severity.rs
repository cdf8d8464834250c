//! Drift severity levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Aggregate drift classification, totally ordered
/// `None < Info < Warning < Breaking`
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum DriftSeverity {
    /// No disallowed differences
    #[default]
    None,

    /// Only value-level or cosmetic changes
    Info,

    /// Additive changes consumers may notice
    Warning,

    /// Likely to break existing consumers
    Breaking,
}

impl DriftSeverity {
    /// All levels in ascending order
    pub const ALL: [DriftSeverity; 4] = [
        DriftSeverity::None,
        DriftSeverity::Info,
        DriftSeverity::Warning,
        DriftSeverity::Breaking,
    ];

    /// Combine two severities, keeping the more severe
    ///
    /// Associative and commutative, with `None` as identity.
    pub fn max(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }

    /// Fold any number of severities into one
    pub fn combine(severities: impl IntoIterator<Item = DriftSeverity>) -> Self {
        severities
            .into_iter()
            .fold(DriftSeverity::None, DriftSeverity::max)
    }

    /// Check if this severity reaches a fail threshold
    ///
    /// A `None` threshold never fails, so `--fail-on none` disables gating.
    pub fn meets(self, threshold: DriftSeverity) -> bool {
        threshold != DriftSeverity::None && self >= threshold
    }

    /// Get a display string for the severity
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftSeverity::None => "none",
            DriftSeverity::Info => "info",
            DriftSeverity::Warning => "warning",
            DriftSeverity::Breaking => "breaking",
        }
    }

    /// Get an indicator for terminal output
    pub fn indicator(&self) -> &'static str {
        match self {
            DriftSeverity::None => "✓",
            DriftSeverity::Info => "~",
            DriftSeverity::Warning => "!",
            DriftSeverity::Breaking => "✗",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(DriftSeverity::None),
            "info" => Some(DriftSeverity::Info),
            "warning" | "warn" => Some(DriftSeverity::Warning),
            "breaking" => Some(DriftSeverity::Breaking),
            _ => None,
        }
    }
}

impl fmt::Display for DriftSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DriftSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "unknown severity '{}' (expected none, info, warning or breaking)",
                s
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(DriftSeverity::None < DriftSeverity::Info);
        assert!(DriftSeverity::Info < DriftSeverity::Warning);
        assert!(DriftSeverity::Warning < DriftSeverity::Breaking);
    }

    #[test]
    fn test_max_is_order_independent() {
        for a in DriftSeverity::ALL {
            assert_eq!(a.max(DriftSeverity::None), a);
            for b in DriftSeverity::ALL {
                assert_eq!(a.max(b), b.max(a));
                for c in DriftSeverity::ALL {
                    assert_eq!(a.max(b).max(c), a.max(b.max(c)));
                }
            }
        }
    }

    #[test]
    fn test_combine() {
        assert_eq!(DriftSeverity::combine([]), DriftSeverity::None);
        assert_eq!(
            DriftSeverity::combine([DriftSeverity::Info, DriftSeverity::Warning, DriftSeverity::Info]),
            DriftSeverity::Warning
        );
    }

    #[test]
    fn test_meets_threshold() {
        assert!(DriftSeverity::Breaking.meets(DriftSeverity::Breaking));
        assert!(DriftSeverity::Breaking.meets(DriftSeverity::Warning));
        assert!(!DriftSeverity::Warning.meets(DriftSeverity::Breaking));
        assert!(!DriftSeverity::Breaking.meets(DriftSeverity::None));
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("BREAKING".parse::<DriftSeverity>(), Ok(DriftSeverity::Breaking));
        assert_eq!(DriftSeverity::parse("warn"), Some(DriftSeverity::Warning));
        assert!("fatal".parse::<DriftSeverity>().is_err());
    }

    #[test]
    fn test_severity_serde() {
        assert_eq!(
            serde_json::to_string(&DriftSeverity::Warning).unwrap(),
            "\"warning\""
        );
        assert_eq!(DriftSeverity::Info.to_string(), "info");
    }
}
