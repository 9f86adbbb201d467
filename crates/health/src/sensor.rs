//! Sensor records and per-group status counters.

use serde::{Deserialize, Serialize};

use crate::tier::{classify, HealthTier};

/// One monitoring check, normalized from the provider's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Name of the device the sensor belongs to.
    pub device_name: String,
    /// Name of the group the device is in.
    pub device_group: String,
    /// Human-readable status, rendered by the provider.
    pub status_text: String,
    /// Raw status code (0-14 for well-behaved providers).
    pub status_code: i64,
}

impl SensorRecord {
    /// Create a sensor record.
    #[must_use]
    pub fn new(
        device_name: impl Into<String>,
        device_group: impl Into<String>,
        status_text: impl Into<String>,
        status_code: i64,
    ) -> Self {
        Self {
            device_name: device_name.into(),
            device_group: device_group.into(),
            status_text: status_text.into(),
            status_code,
        }
    }

    /// Health tier of this sensor.
    #[must_use]
    pub fn tier(&self) -> HealthTier {
        classify(self.status_code)
    }
}

/// Number of sensors per bucket in a device group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub up: u32,
    pub warning: u32,
    pub paused: u32,
    pub down: u32,
}

impl StatusCounts {
    /// Count one sensor in the bucket matching its tier.
    pub fn record(&mut self, tier: HealthTier) {
        match tier {
            HealthTier::Healthy => self.up += 1,
            HealthTier::Degraded => self.warning += 1,
            HealthTier::Paused => self.paused += 1,
            HealthTier::Critical | HealthTier::Unknown => self.down += 1,
        }
    }

    /// Total number of counted sensors.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.up + self.warning + self.paused + self.down
    }

    /// More warnings than every other bucket combined.
    #[must_use]
    pub const fn warning_dominant(&self) -> bool {
        self.warning > self.up + self.paused + self.down
    }

    /// More paused sensors than every other bucket combined.
    #[must_use]
    pub const fn paused_dominant(&self) -> bool {
        self.paused > self.up + self.warning + self.down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_buckets() {
        let mut counts = StatusCounts::default();
        for code in [3, 3, 4, 7, 5, 13] {
            counts.record(classify(code));
        }

        assert_eq!(
            counts,
            StatusCounts {
                up: 2,
                warning: 1,
                paused: 1,
                down: 2,
            }
        );
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_dominance_is_strict() {
        let tied = StatusCounts {
            up: 1,
            warning: 1,
            paused: 0,
            down: 0,
        };
        assert!(!tied.warning_dominant());

        let paused = StatusCounts {
            up: 1,
            warning: 0,
            paused: 2,
            down: 0,
        };
        assert!(paused.paused_dominant());
    }

    #[test]
    fn test_sensor_tier() {
        let sensor = SensorRecord::new("Router", "123 - Network Devices", "Paused by User", 7);
        assert_eq!(sensor.tier(), HealthTier::Paused);
    }
}
