//! Site-level normalization of the probe and group tiers.

use crate::infrastructure::InfrastructureGroupStatus;
use crate::leaf::LeafGroupStatus;
use crate::probe::ProbeStatus;
use crate::tier::HealthTier;

/// Final site tier for an evaluated site.
#[must_use]
pub fn normalize(
    probe: &ProbeStatus,
    infrastructure: &InfrastructureGroupStatus,
    leaf_devices: &LeafGroupStatus,
) -> HealthTier {
    reconcile(probe.tier, infrastructure.tier, leaf_devices.tier)
}

/// Reconcile the probe tier with the two group tiers.
///
/// Only a healthy or degraded probe is adjusted. Any other probe tier is the
/// site tier as-is.
#[must_use]
pub fn reconcile(probe: HealthTier, infrastructure: HealthTier, leaf: HealthTier) -> HealthTier {
    let either = |tier: HealthTier| infrastructure == tier || leaf == tier;
    let both_paused = infrastructure == HealthTier::Paused && leaf == HealthTier::Paused;

    match probe {
        HealthTier::Healthy => {
            if either(HealthTier::Critical) {
                HealthTier::Critical
            } else if either(HealthTier::Degraded) {
                HealthTier::Degraded
            } else if both_paused {
                HealthTier::Paused
            } else {
                HealthTier::Healthy
            }
        }
        HealthTier::Degraded => {
            if both_paused {
                HealthTier::Paused
            } else if either(HealthTier::Critical) || either(HealthTier::Degraded) {
                HealthTier::Critical
            } else {
                HealthTier::Degraded
            }
        }
        HealthTier::Paused | HealthTier::Critical | HealthTier::Unknown => probe,
    }
}
