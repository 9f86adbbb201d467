//! `wifi` command: wireless client lookup.

use tracing::{info, warn};

use crate::error::CommandError;
use crate::format;
use crate::meraki::WirelessDirectory;
use crate::slack::Message;

pub(super) async fn run(
    wireless: &dyn WirelessDirectory,
    mac_address: &str,
) -> Result<Message, CommandError> {
    let client = wireless.client_by_address(mac_address).await?;

    let site = match client.connected_device_address.as_deref() {
        Some(device) => wireless.device_name(device).await?,
        None => {
            warn!(mac_address, "Client has no recent device");
            None
        }
    };

    info!(
        mac_address,
        status = client.status.label(),
        site = site.as_deref().unwrap_or("?"),
        "Looked up wireless client"
    );

    Ok(format::wireless_client(&client, site.as_deref()))
}
