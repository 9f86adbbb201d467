//! Slack rendering of command results.
//!
//! Tiers and raw codes carry no glyphs; this module owns the emoji mapping.

use health::{HealthTier, InfraRole, SensorRecord, SiteStatus};

use crate::meraki::{ClientStatus, WirelessClient};
use crate::slack::{Block, Message, Text};

mod emoji {
    pub const BLACK_SQUARE: &str = ":black_square:";
    pub const GRAY_QUESTION: &str = ":grey_question:";
    pub const GREEN: &str = ":large_green_circle:";
    pub const HOLLOW_RED: &str = ":o:";
    pub const NO_SYMBOL: &str = ":no_entry_sign:";
    pub const ORANGE: &str = ":large_orange_circle:";
    pub const PAUSE: &str = ":double_vertical_bar:";
    pub const RED: &str = ":red_circle:";
    pub const EXCLAMATION: &str = ":exclamation:";
    pub const REPEAT: &str = ":repeat:";
    pub const CLOCK3: &str = ":clock3:";
    pub const YELLOW: &str = ":large_yellow_circle:";
    pub const INFO: &str = ":information_source:";
}

const HELP_TEXT: &str = "VituBot supports the following commands:\n\n\
@vitubot clovers (site ID)\n     - Return all non-online Clovers at a site\n\
@vitubot wifi (Clover MAC address)\n     - Return the status of a Clover\n\
@vitubot status (site ID)\n     - Return the status of an entire site\n\
@vitubot help\n     - Display this message with usage information";

/// Badge for a raw status code.
#[must_use]
pub fn code_badge(status_code: i64) -> String {
    match status_code {
        0 | 6 => emoji::BLACK_SQUARE.to_string(),
        2 => emoji::REPEAT.to_string(),
        3 => emoji::GREEN.to_string(),
        4 => emoji::YELLOW.to_string(),
        5 => emoji::RED.to_string(),
        7..=9 => emoji::PAUSE.to_string(),
        10 => emoji::ORANGE.to_string(),
        11 => emoji::NO_SYMBOL.to_string(),
        12 => format!("{} {}", emoji::PAUSE, emoji::CLOCK3),
        13 => emoji::HOLLOW_RED.to_string(),
        14 => format!("{} {}", emoji::GREEN, emoji::RED),
        _ => emoji::GRAY_QUESTION.to_string(),
    }
}

/// Badge for a health tier.
#[must_use]
pub const fn tier_badge(tier: HealthTier) -> &'static str {
    match tier {
        HealthTier::Healthy => emoji::GREEN,
        HealthTier::Degraded => emoji::YELLOW,
        HealthTier::Paused => emoji::PAUSE,
        HealthTier::Critical => emoji::RED,
        HealthTier::Unknown => emoji::GRAY_QUESTION,
    }
}

fn tier_text(tier: HealthTier) -> String {
    format!("{} {}", tier_badge(tier), tier.label())
}

fn sensor_text(sensor: &SensorRecord) -> String {
    format!("{} {}", code_badge(sensor.status_code), sensor.status_text)
}

/// Shown for roster slots with no sensor.
fn absent_text() -> String {
    format!("{} {}", code_badge(0), health::status_label(0))
}

fn optional_sensor_text(sensor: Option<&SensorRecord>) -> String {
    sensor.map_or_else(absent_text, sensor_text)
}

/// Full site report.
#[must_use]
pub fn site_status(site: &SiteStatus) -> Message {
    let probe = &site.probe;
    let infrastructure = &site.infrastructure;
    let leaf_devices = &site.leaf_devices;

    let mut message = Message::new()
        .with(Block::header(format!(
            "{} Site Status",
            probe.health_sensor.device_group
        )))
        .with(Block::fields([
            ("Overall Status", tier_text(site.overall)),
            ("Probe Health", sensor_text(&probe.health_sensor)),
            (
                "Primary Interface",
                sensor_text(&probe.primary_interface_sensor),
            ),
            ("Failover Status", probe.failover.description().to_string()),
        ]))
        .with(Block::Divider);

    if infrastructure.group_name.is_empty() {
        message.push(Block::header("No network devices found for this probe"));
    } else {
        let mut fields = vec![("Overall Status", tier_text(infrastructure.tier))];
        fields.extend(
            InfraRole::ALL
                .iter()
                .map(|role| (role.label(), optional_sensor_text(infrastructure.sensor(*role)))),
        );
        fields.push((
            "Pi LTE Dongle",
            optional_sensor_text(infrastructure.lte_dongle.as_ref()),
        ));

        message.push(Block::header(format!("{} Status", infrastructure.group_name)));
        message.push(Block::fields(fields));
    }

    message.push(Block::Divider);

    if leaf_devices.total == 0 {
        message.push(Block::header("No Clover devices found for this probe"));
    } else {
        message.push(Block::header(format!("{} Status", leaf_devices.group_name)));
        message.push(Block::fields([
            ("Overall Status", tier_text(leaf_devices.tier)),
            (
                "Clovers Online",
                format!("{} / {}", leaf_devices.counts.up, leaf_devices.total),
            ),
        ]));
    }

    message
}

/// Leaf devices that are not up.
#[must_use]
pub fn leaf_device_list(not_up: &[&SensorRecord]) -> Message {
    let mut message = Message::new().with(Block::Header {
        text: Text::plain_emoji("All Non-Online Clovers"),
    });

    if not_up.is_empty() {
        message.push(Block::section(Text::mrkdwn(format!(
            "{} All Clovers at this site are online!",
            emoji::GREEN
        ))));
        return message;
    }

    for sensor in not_up {
        message.push(Block::section(Text::mrkdwn(format!(
            "{} | {}",
            sensor_text(sensor),
            sensor.device_name
        ))));
    }
    message
}

/// Wireless client report. `site` is the name of the device the client is
/// connected through.
#[must_use]
pub fn wireless_client(client: &WirelessClient, site: Option<&str>) -> Message {
    let status_badge = match client.status {
        ClientStatus::Online => emoji::GREEN,
        ClientStatus::Offline => emoji::RED,
        ClientStatus::Unknown => emoji::GRAY_QUESTION,
    };

    Message::new()
        .with(Block::header("Clover Device Status"))
        .with(Block::fields([
            ("Name", format!("`{}`", client.display_name)),
            ("Status", format!("{status_badge} {}", client.status.label())),
            (
                "Site",
                site.filter(|s| !s.is_empty()).unwrap_or("?").to_string(),
            ),
            ("MAC Address", format!("`{}`", client.address)),
        ]))
}

#[must_use]
pub fn help() -> Message {
    Message::new().with(Block::section(Text::plain_emoji(format!(
        "{} {HELP_TEXT}",
        emoji::INFO
    ))))
}

#[must_use]
pub fn acknowledgement() -> Message {
    Message::new().with(Block::section(Text::mrkdwn(format!(
        "{} Processing your request...",
        emoji::REPEAT
    ))))
}

#[must_use]
pub fn error_message(reason: &str) -> Message {
    Message::new().with(Block::section(Text::mrkdwn(format!(
        "{} Error processing your request:\n\n{reason}",
        emoji::EXCLAMATION
    ))))
}
