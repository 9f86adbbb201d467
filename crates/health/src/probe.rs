//! Probe (on-site gateway) evaluation.
//!
//! The probe's own health sensor anchors the overall site status. Its primary
//! interface sensor tells whether the site reaches the internet over the ISP
//! line or over the cellular backup.

use serde::Serialize;

use crate::sensor::SensorRecord;
use crate::tier::{classify, HealthTier, STATUS_UP};

/// Group-name marker of sites that only ever connect over LTE.
const LTE_ONLY_MARKER: &str = "LTE Only";

/// Internet connectivity of a site as seen from its probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Failover {
    /// Primary interface is up.
    Isp,
    /// LTE-only site running on its cellular link.
    Lte,
    /// Primary interface is down and the site fell back to LTE.
    FailedOver,
    /// The probe itself is not up.
    Down,
}

impl Failover {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Isp => "Site is on ISP connection",
            Self::Lte => "Site is on LTE connection",
            Self::FailedOver => "Site has failed over to LTE connection",
            Self::Down => "Site is down",
        }
    }
}

/// Derived status of a site's probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeStatus {
    /// The probe health sensor.
    pub health_sensor: SensorRecord,
    /// The sensor watching the probe's wired uplink.
    pub primary_interface_sensor: SensorRecord,
    /// Health tier of the probe, before site-level normalization.
    pub tier: HealthTier,
    /// Connectivity state.
    pub failover: Failover,
    /// Whether the site is permanently on LTE.
    pub is_lte_only: bool,
}

/// Evaluate a probe from its health and primary interface sensors.
///
/// A healthy probe whose primary interface is down on a site that is not
/// LTE-only has failed over, which degrades the probe even though it reports up.
#[must_use]
pub fn evaluate_probe(
    health_sensor: SensorRecord,
    primary_interface_sensor: SensorRecord,
) -> ProbeStatus {
    let is_lte_only = health_sensor.device_group.contains(LTE_ONLY_MARKER);
    let mut tier = classify(health_sensor.status_code);

    let failover = if health_sensor.status_code != STATUS_UP {
        Failover::Down
    } else if primary_interface_sensor.status_code == STATUS_UP {
        Failover::Isp
    } else if is_lte_only {
        Failover::Lte
    } else {
        tier = HealthTier::Degraded;
        Failover::FailedOver
    };

    ProbeStatus {
        health_sensor,
        primary_interface_sensor,
        tier,
        failover,
        is_lte_only,
    }
}
