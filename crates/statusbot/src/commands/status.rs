//! `status` command: full site report.

use health::SiteStatus;
use tracing::info;

use crate::error::CommandError;
use crate::format;
use crate::prtg::SensorProvider;
use crate::slack::Message;

pub(super) async fn run(
    sensors: &dyn SensorProvider,
    site_id: &str,
) -> Result<Message, CommandError> {
    let (pings, health, primary_interface, lte_dongle) = tokio::try_join!(
        sensors.all_ping_sensors(site_id),
        sensors.health_sensor(site_id),
        sensors.primary_interface_sensor(site_id),
        sensors.lte_dongle_sensor(site_id),
    )?;

    let site = SiteStatus::evaluate(health, primary_interface, lte_dongle, &pings);

    info!(
        site_id,
        overall = %site.overall,
        probe = %site.probe.tier,
        infrastructure = %site.infrastructure.tier,
        leaf_devices = %site.leaf_devices.tier,
        "Evaluated site"
    );

    Ok(format::site_status(&site))
}
