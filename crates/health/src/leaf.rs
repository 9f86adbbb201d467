//! Leaf device (point-of-sale terminal) group evaluation.

use serde::Serialize;

use crate::sensor::{SensorRecord, StatusCounts};
use crate::tier::{HealthTier, STATUS_UP};

/// Group-name marker of the leaf devices group.
pub const LEAF_GROUP_MARKER: &str = "Clover Devices";

const HEALTHY_PERCENT: f64 = 90.0;
const DEGRADED_PERCENT: f64 = 80.0;

/// Derived status of a site's leaf devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafGroupStatus {
    /// Group name; empty when the site has no leaf devices.
    pub group_name: String,
    pub tier: HealthTier,
    pub counts: StatusCounts,
    pub total: u32,
}

impl LeafGroupStatus {
    /// Percentage of leaf devices that are up, `None` without devices.
    #[must_use]
    pub fn percent_up(&self) -> Option<f64> {
        (self.total > 0).then(|| f64::from(self.counts.up) / f64::from(self.total) * 100.0)
    }
}

/// Aggregate the leaf devices of a site.
///
/// Express sites have no leaf devices at all; that is reported as `Unknown`
/// rather than as an error.
#[must_use]
pub fn evaluate_leaf_devices(sensors: &[SensorRecord]) -> LeafGroupStatus {
    let mut counts = StatusCounts::default();
    let mut group_name = String::new();

    for sensor in sensors
        .iter()
        .filter(|s| s.device_group.contains(LEAF_GROUP_MARKER))
    {
        group_name.clone_from(&sensor.device_group);
        counts.record(sensor.tier());
    }

    let mut status = LeafGroupStatus {
        group_name,
        tier: HealthTier::Unknown,
        counts,
        total: counts.total(),
    };

    if let Some(percent_up) = status.percent_up() {
        status.tier = leaf_tier(percent_up, counts);
    }

    status
}

fn leaf_tier(percent_up: f64, counts: StatusCounts) -> HealthTier {
    if percent_up >= HEALTHY_PERCENT {
        HealthTier::Healthy
    } else if percent_up >= DEGRADED_PERCENT || counts.warning_dominant() {
        HealthTier::Degraded
    } else if counts.paused_dominant() {
        HealthTier::Paused
    } else if percent_up < DEGRADED_PERCENT {
        HealthTier::Critical
    } else {
        HealthTier::Unknown
    }
}

/// Leaf sensors that are not up, in input order.
#[must_use]
pub fn not_up(sensors: &[SensorRecord]) -> Vec<&SensorRecord> {
    sensors
        .iter()
        .filter(|s| s.status_code != STATUS_UP)
        .collect()
}
