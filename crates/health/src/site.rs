//! Whole-site evaluation.

use serde::Serialize;

use crate::infrastructure::{evaluate_infrastructure, InfrastructureGroupStatus};
use crate::leaf::{evaluate_leaf_devices, LeafGroupStatus};
use crate::normalize::normalize;
use crate::probe::{evaluate_probe, ProbeStatus};
use crate::sensor::SensorRecord;
use crate::tier::HealthTier;

/// Evaluated status of one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteStatus {
    pub probe: ProbeStatus,
    pub infrastructure: InfrastructureGroupStatus,
    pub leaf_devices: LeafGroupStatus,
    /// Normalized site tier. `probe.tier` keeps the probe's own tier.
    pub overall: HealthTier,
}

impl SiteStatus {
    /// Evaluate a site from its raw sensors.
    ///
    /// `ping_sensors` mixes network and leaf device pings; each group
    /// evaluator picks its own by group name.
    #[must_use]
    pub fn evaluate(
        health_sensor: SensorRecord,
        primary_interface_sensor: SensorRecord,
        lte_dongle: Option<SensorRecord>,
        ping_sensors: &[SensorRecord],
    ) -> Self {
        let probe = evaluate_probe(health_sensor, primary_interface_sensor);
        let infrastructure = evaluate_infrastructure(ping_sensors, lte_dongle);
        let leaf_devices = evaluate_leaf_devices(ping_sensors);
        let overall = normalize(&probe, &infrastructure, &leaf_devices);

        Self {
            probe,
            infrastructure,
            leaf_devices,
            overall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: &str = "123 - Network Devices";
    const CLOVERS: &str = "123 - Clover Devices";

    fn pings(clover_down: usize) -> Vec<SensorRecord> {
        let mut sensors: Vec<_> = [
            "Meraki AP",
            "Router",
            "PDU",
            "api.ca.vitupay.com",
            "Raspberry Pi",
            "d.clover.com",
        ]
        .iter()
        .map(|name| SensorRecord::new(*name, NETWORK, "Up", 3))
        .collect();

        for i in 0..10 {
            let code = if i < clover_down { 5 } else { 3 };
            sensors.push(SensorRecord::new(format!("Clover {i}"), CLOVERS, "", code));
        }
        sensors
    }

    fn evaluate(sensors: &[SensorRecord], interface_code: i64) -> SiteStatus {
        SiteStatus::evaluate(
            SensorRecord::new("Probe", "123 - Store", "Up", 3),
            SensorRecord::new("Probe", "123 - Store", "", interface_code),
            Some(SensorRecord::new("123 Pi LTE", "PI - LTE", "Up", 3)),
            sensors,
        )
    }

    #[test]
    fn test_healthy_site() {
        let site = evaluate(&pings(0), 3);
        assert_eq!(site.infrastructure.tier, HealthTier::Healthy);
        assert_eq!(site.leaf_devices.tier, HealthTier::Healthy);
        assert_eq!(site.overall, HealthTier::Healthy);
    }

    #[test]
    fn test_critical_leaf_group_escalates_site() {
        let site = evaluate(&pings(3), 3);
        assert_eq!(site.probe.tier, HealthTier::Healthy);
        assert_eq!(site.overall, HealthTier::Critical);
    }

    #[test]
    fn test_failover_with_degraded_group_is_critical() {
        let site = evaluate(&pings(2), 5);
        assert_eq!(site.probe.tier, HealthTier::Degraded);
        assert_eq!(site.leaf_devices.tier, HealthTier::Degraded);
        assert_eq!(site.overall, HealthTier::Critical);
    }

    #[test]
    fn test_shuffled_input_gives_identical_result() {
        let sensors = pings(2);
        let expected = evaluate(&sensors, 3);

        let mut reversed = sensors.clone();
        reversed.reverse();
        let mut rotated = sensors.clone();
        rotated.rotate_left(7);

        for shuffled in [reversed, rotated] {
            let site = evaluate(&shuffled, 3);
            assert_eq!(site.infrastructure.counts, expected.infrastructure.counts);
            assert_eq!(site.infrastructure.tier, expected.infrastructure.tier);
            assert_eq!(site.leaf_devices.counts, expected.leaf_devices.counts);
            assert_eq!(site.leaf_devices.tier, expected.leaf_devices.tier);
            assert_eq!(site.overall, expected.overall);
        }
    }
}
