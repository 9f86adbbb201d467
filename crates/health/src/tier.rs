//! Health tiers and the status code classifier.

use serde::{Deserialize, Serialize};

/// Status code reported by the monitoring source for a sensor that is up.
pub const STATUS_UP: i64 = 3;

/// Codes that need attention without being down: scanning, warning, no probe,
/// unusual, not licensed and partially down.
const DEGRADED_CODES: [i64; 6] = [2, 4, 6, 10, 11, 14];

/// Codes for sensors paused by a user, a dependency, a schedule or temporarily.
const PAUSED_CODES: [i64; 4] = [7, 8, 9, 12];

/// Normalized health classification surfaced to users.
///
/// Tiers are compared by identity only. Glyphs and colors belong to the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    /// Everything that matters is up.
    Healthy,
    /// Something needs attention but the site is operating.
    Degraded,
    /// Monitoring is paused.
    Paused,
    /// Down, or in a state that must be treated as down.
    Critical,
    /// Not enough information to decide.
    Unknown,
}

impl HealthTier {
    /// Plain display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Degraded => "Degraded",
            Self::Paused => "Paused",
            Self::Critical => "CRITICAL",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for HealthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a raw status code.
///
/// Total over the integer domain: codes outside the known sets, including
/// ones the monitoring source never defines, are `Critical`.
#[must_use]
pub fn classify(status_code: i64) -> HealthTier {
    if status_code == STATUS_UP {
        HealthTier::Healthy
    } else if DEGRADED_CODES.contains(&status_code) {
        HealthTier::Degraded
    } else if PAUSED_CODES.contains(&status_code) {
        HealthTier::Paused
    } else {
        HealthTier::Critical
    }
}

/// Label the monitoring source uses for a raw status code.
#[must_use]
pub const fn status_label(status_code: i64) -> &'static str {
    match status_code {
        0 => "None",
        2 => "Scanning",
        3 => "Up",
        4 => "Warning",
        5 => "Down",
        6 => "No Probe",
        7 => "Paused by User",
        8 => "Paused by Dependency",
        9 => "Paused by Schedule",
        10 => "Unusual",
        11 => "Not Licensed",
        12 => "Paused Temporarily",
        13 => "Down Acknowledged",
        14 => "Down Partial",
        _ => "Unknown",
    }
}
