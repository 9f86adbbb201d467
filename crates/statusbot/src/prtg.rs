//! PRTG sensor lookups.
//!
//! Sensors are read from the `table.xml` API with `output=json`. Every site
//! owns one probe whose name contains the 3-digit site id.

use std::fmt;

use async_trait::async_trait;
use health::{status_label, SensorRecord};
use serde::Deserialize;
use tracing::debug;

use crate::error::LookupError;

const SERVICE: &str = "PRTG";

const PROBE_HEALTH_NAME: &str = "Probe Health";
const PRIMARY_INTERFACE_NAME: &str = "Primary Interface";
const PING_NAME: &str = "Ping";
const PI_LTE_DONGLE_GROUP: &str = "PI - LTE";
const LEAF_DEVICES_GROUP: &str = "Clover Devices";

/// Row limit for group-wide ping queries.
const API_RESPONSE_LIMIT: &str = "50000";

/// Source of raw sensor records for a site.
#[async_trait]
pub trait SensorProvider: Send + Sync {
    /// The probe's own health sensor. `NotFound` when the site has no probe.
    async fn health_sensor(&self, site_id: &str) -> Result<SensorRecord, LookupError>;

    /// The probe's primary WAN interface sensor.
    async fn primary_interface_sensor(&self, site_id: &str)
        -> Result<SensorRecord, LookupError>;

    /// Ping sensor of the LTE dongle on the site's Pi, if one is monitored.
    async fn lte_dongle_sensor(&self, site_id: &str)
        -> Result<Option<SensorRecord>, LookupError>;

    /// Every ping sensor under the site's probe.
    async fn all_ping_sensors(&self, site_id: &str) -> Result<Vec<SensorRecord>, LookupError>;

    /// Ping sensors of the site's leaf device group only.
    async fn leaf_ping_sensors(&self, site_id: &str) -> Result<Vec<SensorRecord>, LookupError>;
}

/// PRTG table API client.
#[derive(Clone)]
pub struct PrtgClient {
    client: reqwest::Client,
    table_url: String,
    api_key: String,
}

impl fmt::Debug for PrtgClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrtgClient")
            .field("table_url", &self.table_url)
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl PrtgClient {
    /// Create a client for the table endpoint, e.g.
    /// `https://prtg.example.com/api/table.xml`.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        table_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_url: table_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn sensors(&self, params: &[(&str, &str)]) -> Result<Vec<SensorRecord>, LookupError> {
        debug!(?params, "Querying PRTG sensors");

        let response = self
            .client
            .get(&self.table_url)
            .query(&[("content", "sensors"), ("output", "json")])
            .query(params)
            .query(&[("apitoken", self.api_key.as_str())])
            .send()
            .await
            .map_err(LookupError::request(SERVICE))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                service: SERVICE,
                status,
                body,
            });
        }

        let table: SensorTable = response
            .json()
            .await
            .map_err(LookupError::request(SERVICE))?;

        Ok(table.sensors.into_iter().map(SensorRow::into_record).collect())
    }

    async fn first(
        &self,
        params: &[(&str, &str)],
        not_found: impl FnOnce() -> String,
    ) -> Result<SensorRecord, LookupError> {
        self.sensors(params)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(not_found()))
    }
}

#[async_trait]
impl SensorProvider for PrtgClient {
    async fn health_sensor(&self, site_id: &str) -> Result<SensorRecord, LookupError> {
        let probe = probe_filter(site_id);
        self.first(
            &[
                ("columns", "name,device,group,probe,status"),
                ("filter_probe", probe.as_str()),
                ("filter_name", PROBE_HEALTH_NAME),
                ("sortby", "device"),
                ("count", "2"),
            ],
            || format!("Probe does not exist with site ID: {site_id}"),
        )
        .await
    }

    async fn primary_interface_sensor(
        &self,
        site_id: &str,
    ) -> Result<SensorRecord, LookupError> {
        let probe = probe_filter(site_id);
        self.first(
            &[
                ("columns", "name,status,probe,group,device"),
                ("filter_probe", probe.as_str()),
                ("filter_name", PRIMARY_INTERFACE_NAME),
                ("count", "2"),
            ],
            || format!("Primary interface sensor not found at site {site_id}"),
        )
        .await
    }

    async fn lte_dongle_sensor(
        &self,
        site_id: &str,
    ) -> Result<Option<SensorRecord>, LookupError> {
        let device = probe_filter(site_id);
        let sensors = self
            .sensors(&[
                ("columns", "name,device,group,status"),
                ("filter_group", PI_LTE_DONGLE_GROUP),
                ("filter_device", device.as_str()),
                ("filter_name", PING_NAME),
                ("count", "2"),
            ])
            .await?;

        if sensors.is_empty() {
            debug!(site_id, "No LTE dongle sensor at site");
        }
        Ok(sensors.into_iter().next())
    }

    async fn all_ping_sensors(&self, site_id: &str) -> Result<Vec<SensorRecord>, LookupError> {
        let probe = probe_filter(site_id);
        let sensors = self
            .sensors(&[
                ("columns", "name,device,group,probe,status,parentid"),
                ("filter_probe", probe.as_str()),
                ("filter_name", PING_NAME),
                ("sortby", "device"),
                ("count", API_RESPONSE_LIMIT),
            ])
            .await?;

        if sensors.is_empty() {
            return Err(LookupError::NotFound(format!(
                "No ping sensors were found at site {site_id}"
            )));
        }
        Ok(sensors)
    }

    async fn leaf_ping_sensors(&self, site_id: &str) -> Result<Vec<SensorRecord>, LookupError> {
        let probe = probe_filter(site_id);
        let group = format!("@sub({LEAF_DEVICES_GROUP})");
        let sensors = self
            .sensors(&[
                ("columns", "name,device,group,probe,status,parentid"),
                ("filter_probe", probe.as_str()),
                ("filter_group", group.as_str()),
                ("filter_name", PING_NAME),
                ("sortby", "device"),
                ("count", API_RESPONSE_LIMIT),
            ])
            .await?;

        if sensors.is_empty() {
            return Err(LookupError::NotFound(format!(
                "No Clover ping sensors were found at site {site_id}"
            )));
        }
        Ok(sensors)
    }
}

fn probe_filter(site_id: &str) -> String {
    format!("@sub({site_id})")
}

#[derive(Debug, Deserialize)]
struct SensorTable {
    #[serde(default)]
    sensors: Vec<SensorRow>,
}

#[derive(Debug, Deserialize)]
struct SensorRow {
    #[serde(default)]
    device: String,
    #[serde(default)]
    group: String,
    status_raw: i64,
}

impl SensorRow {
    fn into_record(self) -> SensorRecord {
        SensorRecord::new(
            self.device,
            self.group,
            status_label(self.status_raw),
            self.status_raw,
        )
    }
}
