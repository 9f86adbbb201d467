//! Meraki Dashboard wireless client lookups.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LookupError;

const SERVICE: &str = "Meraki";

/// Connection state of a wireless client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Online,
    Offline,
    Unknown,
}

impl ClientStatus {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Online") => Self::Online,
            Some("Offline") => Self::Offline,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Unknown => "Unknown",
        }
    }
}

/// A client seen by the wireless network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WirelessClient {
    /// Client MAC address
    pub address: String,
    /// Dashboard description, or the MAC address when none is set
    pub display_name: String,
    pub status: ClientStatus,
    /// MAC address of the access point the client last connected through
    pub connected_device_address: Option<String>,
}

/// Lookup of wireless clients and network devices.
#[async_trait]
pub trait WirelessDirectory: Send + Sync {
    /// Find a client by MAC address. `NotFound` when the network has never
    /// seen it.
    async fn client_by_address(&self, mac: &str) -> Result<WirelessClient, LookupError>;

    /// Name of the network device with the given MAC address.
    async fn device_name(&self, mac: &str) -> Result<Option<String>, LookupError>;
}

/// Meraki Dashboard API v1 client scoped to one network.
#[derive(Clone)]
pub struct MerakiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    network_id: String,
}

impl fmt::Debug for MerakiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerakiClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[redacted]")
            .field("network_id", &self.network_id)
            .finish_non_exhaustive()
    }
}

impl MerakiClient {
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        network_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            network_id: network_id.into(),
        }
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, LookupError> {
        let url = format!("{}/networks/{}/{path}", self.api_url, self.network_id);
        debug!(url = %url, "Querying Meraki");

        self.client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(LookupError::request(SERVICE))
    }
}

#[async_trait]
impl WirelessDirectory for MerakiClient {
    async fn client_by_address(&self, mac: &str) -> Result<WirelessClient, LookupError> {
        let response = self.get(&format!("clients/{mac}")).await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(format!(
                "Could not find Clover with MAC address `{mac}`"
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let raw: RawClient = response
            .json()
            .await
            .map_err(LookupError::request(SERVICE))?;

        Ok(WirelessClient {
            display_name: raw.description.unwrap_or_else(|| raw.mac.clone()),
            status: ClientStatus::parse(raw.status.as_deref()),
            connected_device_address: raw.recent_device_mac,
            address: raw.mac,
        })
    }

    async fn device_name(&self, mac: &str) -> Result<Option<String>, LookupError> {
        let response = self.get("devices").await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                service: SERVICE,
                status,
                body,
            });
        }

        let devices: Vec<RawDevice> = response
            .json()
            .await
            .map_err(LookupError::request(SERVICE))?;

        Ok(devices
            .into_iter()
            .find(|device| device.mac.eq_ignore_ascii_case(mac))
            .and_then(|device| device.name))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClient {
    mac: String,
    description: Option<String>,
    status: Option<String>,
    recent_device_mac: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDevice {
    mac: String,
    name: Option<String>,
}
