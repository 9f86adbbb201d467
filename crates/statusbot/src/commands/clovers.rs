//! `clovers` command: leaf devices that are not up.

use health::not_up;
use tracing::info;

use crate::error::CommandError;
use crate::format;
use crate::prtg::SensorProvider;
use crate::slack::Message;

pub(super) async fn run(
    sensors: &dyn SensorProvider,
    site_id: &str,
) -> Result<Message, CommandError> {
    let leaf_devices = sensors.leaf_ping_sensors(site_id).await?;
    let offline = not_up(&leaf_devices);

    info!(
        site_id,
        total = leaf_devices.len(),
        not_up = offline.len(),
        "Listed leaf devices"
    );

    Ok(format::leaf_device_list(&offline))
}
