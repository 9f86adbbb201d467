//! Network infrastructure group evaluation.
//!
//! Every site has a fixed roster of network devices, each monitored by one
//! ping sensor, plus a cellular dongle attached to the Raspberry Pi.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::sensor::{SensorRecord, StatusCounts};
use crate::tier::{HealthTier, STATUS_UP};

/// Group-name marker of the network devices group.
pub const INFRASTRUCTURE_GROUP_MARKER: &str = "Network Devices";

/// Up count of a fully healthy group: six roles plus the LTE dongle.
const FULL_ROSTER: u32 = 7;

/// Fixed device roles within the network devices group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfraRole {
    /// Meraki wireless access point the leaf devices connect through.
    AccessPoint,
    /// Cradlepoint router feeding the network devices.
    Router,
    /// Power distribution unit.
    Pdu,
    /// Reachability of the payment API (`api.ca.vitupay.com`).
    PaymentApi,
    /// The on-site Raspberry Pi.
    Pi,
    /// Reachability of the POS backend (`d.clover.com`).
    PosApi,
}

impl InfraRole {
    /// All roles, in display order.
    pub const ALL: [Self; 6] = [
        Self::AccessPoint,
        Self::Router,
        Self::Pdu,
        Self::PaymentApi,
        Self::PosApi,
        Self::Pi,
    ];

    /// Match a device name to a role.
    ///
    /// Substring checks run in a fixed order, so `api.ca.vitupay.com` is the
    /// payment API and not the Pi even though it contains "pi".
    #[must_use]
    pub fn from_device_name(device_name: &str) -> Option<Self> {
        let name = device_name.to_lowercase();

        if name.contains("meraki") {
            Some(Self::AccessPoint)
        } else if name.contains("router") {
            Some(Self::Router)
        } else if name.contains("pdu") {
            Some(Self::Pdu)
        } else if name.contains("vitupay") {
            Some(Self::PaymentApi)
        } else if name.contains("pi") {
            Some(Self::Pi)
        } else if name.contains("d.clover.com") {
            Some(Self::PosApi)
        } else {
            None
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AccessPoint => "Meraki",
            Self::Router => "Router",
            Self::Pdu => "PDU",
            Self::PaymentApi => "vitupay . com",
            Self::Pi => "Pi",
            Self::PosApi => "d . clover . com",
        }
    }
}

/// Derived status of a site's network devices group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfrastructureGroupStatus {
    /// Group name; empty when no network device sensor matched.
    pub group_name: String,
    pub tier: HealthTier,
    /// Sensor per filled role.
    pub sensors: BTreeMap<InfraRole, SensorRecord>,
    /// The Pi's LTE dongle, if the provider found one.
    pub lte_dongle: Option<SensorRecord>,
    pub counts: StatusCounts,
}

impl InfrastructureGroupStatus {
    /// Sensor filling a role, if any.
    #[must_use]
    pub fn sensor(&self, role: InfraRole) -> Option<&SensorRecord> {
        self.sensors.get(&role)
    }
}

/// Aggregate the network devices of a site.
///
/// The LTE dongle only ever adds to the up count; a missing or non-up dongle
/// contributes nothing to any bucket.
#[must_use]
pub fn evaluate_infrastructure(
    sensors: &[SensorRecord],
    lte_dongle: Option<SensorRecord>,
) -> InfrastructureGroupStatus {
    let mut counts = StatusCounts::default();
    if lte_dongle
        .as_ref()
        .is_some_and(|dongle| dongle.status_code == STATUS_UP)
    {
        counts.up += 1;
    }

    let mut group_name = String::new();
    let mut roles = BTreeMap::new();

    for sensor in sensors
        .iter()
        .filter(|s| s.device_group.contains(INFRASTRUCTURE_GROUP_MARKER))
    {
        group_name.clone_from(&sensor.device_group);

        let Some(role) = InfraRole::from_device_name(&sensor.device_name) else {
            warn!(
                group = %sensor.device_group,
                device = %sensor.device_name,
                "Unrecognized network device ping sensor"
            );
            continue;
        };

        counts.record(sensor.tier());
        roles.insert(role, sensor.clone());
    }

    InfrastructureGroupStatus {
        group_name,
        tier: infrastructure_tier(counts),
        sensors: roles,
        lte_dongle,
        counts,
    }
}

fn infrastructure_tier(counts: StatusCounts) -> HealthTier {
    if counts.up == FULL_ROSTER {
        HealthTier::Healthy
    } else if counts.up == FULL_ROSTER - 1 || counts.warning_dominant() {
        HealthTier::Degraded
    } else if counts.paused_dominant() {
        HealthTier::Paused
    } else if counts.up < FULL_ROSTER - 1 {
        HealthTier::Critical
    } else {
        HealthTier::Unknown
    }
}
