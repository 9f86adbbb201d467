//! Site health aggregation for monitored retail sites.
//!
//! This crate holds the decision logic of the status bot:
//! - Classification of raw monitoring status codes into health tiers
//! - Probe (on-site gateway) evaluation, including LTE failover detection
//! - Network infrastructure and leaf device group aggregation
//! - Normalization of the group tiers into a single site tier
//!
//! Everything here is a pure function over request-scoped values. Fetching
//! sensors and rendering messages live in the `statusbot` crate.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod infrastructure;
pub mod leaf;
pub mod normalize;
pub mod probe;
pub mod sensor;
pub mod site;
pub mod tier;

pub use infrastructure::{evaluate_infrastructure, InfraRole, InfrastructureGroupStatus};
pub use leaf::{evaluate_leaf_devices, not_up, LeafGroupStatus};
pub use normalize::{normalize, reconcile};
pub use probe::{evaluate_probe, Failover, ProbeStatus};
pub use sensor::{SensorRecord, StatusCounts};
pub use site::SiteStatus;
pub use tier::{classify, status_label, HealthTier, STATUS_UP};
