//! Mention command parsing and dispatch.
//!
//! A mention is split on whitespace into `["@bot", command, argument]`.
//! Commands that take an argument need exactly three tokens.

mod clovers;
mod help;
mod status;
mod wifi;

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{error, info, warn};

use crate::error::CommandError;
use crate::meraki::WirelessDirectory;
use crate::prtg::SensorProvider;
use crate::slack::{ChatNotifier, Message};

/// Token count of a command that takes one argument.
const ARGUMENT_COMMAND_TOKENS: usize = 3;

static SITE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("site id pattern is valid"));

static MAC_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-f]{2}:){5}[0-9a-f]{2}$").expect("MAC address pattern is valid")
});

/// A parsed bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Full report for a site
    Status { site_id: String },
    /// Leaf devices at a site that are not up
    Clovers { site_id: String },
    /// Wireless client lookup by MAC address
    Wifi { mac_address: String },
    Help,
}

impl Command {
    /// Parse the text of a mention.
    ///
    /// A bare mention or an unknown command parses as `Help`.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        let Some(name) = tokens.get(1).map(|name| name.to_lowercase()) else {
            info!("Bot was mentioned with no command");
            return Ok(Self::Help);
        };

        match name.as_str() {
            "status" => Ok(Self::Status {
                site_id: site_id(argument(&tokens)?)?,
            }),
            "clovers" => Ok(Self::Clovers {
                site_id: site_id(argument(&tokens)?)?,
            }),
            "wifi" => Ok(Self::Wifi {
                mac_address: mac_address(argument(&tokens)?)?,
            }),
            "help" => Ok(Self::Help),
            unknown => {
                warn!(command = %unknown, "Unknown command, showing help");
                Ok(Self::Help)
            }
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Clovers { .. } => "clovers",
            Self::Wifi { .. } => "wifi",
            Self::Help => "help",
        }
    }
}

fn argument<'a>(tokens: &[&'a str]) -> Result<&'a str, CommandError> {
    let count = tokens.len();
    if count > ARGUMENT_COMMAND_TOKENS {
        return Err(CommandError::Validation(format!(
            "Too many arguments - expecting {ARGUMENT_COMMAND_TOKENS} but got {count}"
        )));
    }
    if count < ARGUMENT_COMMAND_TOKENS {
        return Err(CommandError::Validation(format!(
            "Too few arguments - expecting {ARGUMENT_COMMAND_TOKENS}, but got {count}"
        )));
    }
    Ok(tokens[2])
}

/// Validate a 3-digit site id.
pub fn site_id(raw: &str) -> Result<String, CommandError> {
    let site_id = raw.trim();
    if SITE_ID.is_match(site_id) {
        Ok(site_id.to_string())
    } else {
        Err(CommandError::Validation(
            "Invalid site ID - Must be a valid 3-digit ID".to_string(),
        ))
    }
}

/// Normalize and validate a MAC address: hyphens become colons, letters
/// are lowercased.
pub fn mac_address(raw: &str) -> Result<String, CommandError> {
    let mac = raw.trim().replace('-', ":").to_lowercase();
    if MAC_ADDRESS.is_match(&mac) {
        Ok(mac)
    } else {
        Err(CommandError::Validation(
            "Invalid MAC address - Must be a valid 12-digit MAC address with colons (:)"
                .to_string(),
        ))
    }
}

/// Runs commands against the injected collaborators and posts the replies.
#[derive(Clone)]
pub struct Dispatcher {
    sensors: Arc<dyn SensorProvider>,
    wireless: Arc<dyn WirelessDirectory>,
    notifier: Arc<dyn ChatNotifier>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        sensors: Arc<dyn SensorProvider>,
        wireless: Arc<dyn WirelessDirectory>,
        notifier: Arc<dyn ChatNotifier>,
    ) -> Self {
        Self {
            sensors,
            wireless,
            notifier,
        }
    }

    /// Build the reply for a command.
    pub async fn execute(&self, command: &Command) -> Result<Message, CommandError> {
        match command {
            Command::Status { site_id } => status::run(self.sensors.as_ref(), site_id).await,
            Command::Clovers { site_id } => clovers::run(self.sensors.as_ref(), site_id).await,
            Command::Wifi { mac_address } => {
                wifi::run(self.wireless.as_ref(), mac_address).await
            }
            Command::Help => Ok(help::run()),
        }
    }

    /// Handle the text of a mention end to end.
    ///
    /// Posts an acknowledgement, then either the command's reply or exactly
    /// one error message.
    pub async fn handle_mention(&self, text: &str) {
        info!(text = %text, "Received mention");

        if let Err(e) = self.notifier.post_ack().await {
            warn!(error = %e, "Failed to post acknowledgement");
        }

        let result = match Command::parse(text) {
            Ok(command) => {
                info!(command = command.name(), "Executing command");
                // A panicking collaborator still gets an error reply
                let dispatcher = self.clone();
                tokio::spawn(async move { dispatcher.execute(&command).await })
                    .await
                    .unwrap_or_else(|e| Err(CommandError::Unexpected(e.to_string())))
            }
            Err(e) => Err(e),
        };

        let posted = match result {
            Ok(message) => self.notifier.post_message(&message).await,
            Err(e) => {
                error!(error = %e, "Command failed");
                self.notifier.post_error(&e.user_message()).await
            }
        };

        if let Err(e) = posted {
            error!(error = %e, "Failed to post reply");
        }
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    //! In-memory collaborators for command tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use health::SensorRecord;

    use crate::error::LookupError;
    use crate::meraki::{WirelessClient, WirelessDirectory};
    use crate::prtg::SensorProvider;
    use crate::slack::{ChannelError, ChatNotifier, Message};

    /// Sensors for a single site; any other site id is unknown.
    #[derive(Default)]
    pub struct FakeSensors {
        pub site_id: String,
        pub health: Option<SensorRecord>,
        pub primary_interface: Option<SensorRecord>,
        pub lte_dongle: Option<SensorRecord>,
        pub pings: Vec<SensorRecord>,
    }

    impl FakeSensors {
        fn not_found(site_id: &str) -> LookupError {
            LookupError::NotFound(format!("Probe does not exist with site ID: {site_id}"))
        }

        fn site(&self, site_id: &str) -> Result<(), LookupError> {
            if site_id == self.site_id {
                Ok(())
            } else {
                Err(Self::not_found(site_id))
            }
        }
    }

    #[async_trait]
    impl SensorProvider for FakeSensors {
        async fn health_sensor(&self, site_id: &str) -> Result<SensorRecord, LookupError> {
            self.site(site_id)?;
            self.health.clone().ok_or_else(|| Self::not_found(site_id))
        }

        async fn primary_interface_sensor(
            &self,
            site_id: &str,
        ) -> Result<SensorRecord, LookupError> {
            self.site(site_id)?;
            self.primary_interface.clone().ok_or_else(|| {
                LookupError::NotFound(format!(
                    "Primary interface sensor not found at site {site_id}"
                ))
            })
        }

        async fn lte_dongle_sensor(
            &self,
            site_id: &str,
        ) -> Result<Option<SensorRecord>, LookupError> {
            self.site(site_id)?;
            Ok(self.lte_dongle.clone())
        }

        async fn all_ping_sensors(
            &self,
            site_id: &str,
        ) -> Result<Vec<SensorRecord>, LookupError> {
            self.site(site_id)?;
            Ok(self.pings.clone())
        }

        async fn leaf_ping_sensors(
            &self,
            site_id: &str,
        ) -> Result<Vec<SensorRecord>, LookupError> {
            self.site(site_id)?;
            let leaf: Vec<_> = self
                .pings
                .iter()
                .filter(|s| s.device_group.contains("Clover Devices"))
                .cloned()
                .collect();
            if leaf.is_empty() {
                return Err(LookupError::NotFound(format!(
                    "No Clover ping sensors were found at site {site_id}"
                )));
            }
            Ok(leaf)
        }
    }

    #[derive(Default)]
    pub struct FakeWireless {
        pub clients: HashMap<String, WirelessClient>,
        pub devices: HashMap<String, String>,
    }

    #[async_trait]
    impl WirelessDirectory for FakeWireless {
        async fn client_by_address(&self, mac: &str) -> Result<WirelessClient, LookupError> {
            self.clients.get(mac).cloned().ok_or_else(|| {
                LookupError::NotFound(format!("Could not find Clover with MAC address `{mac}`"))
            })
        }

        async fn device_name(&self, mac: &str) -> Result<Option<String>, LookupError> {
            Ok(self.devices.get(mac).cloned())
        }
    }

    /// Records every posted message.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub posted: Mutex<Vec<Message>>,
    }

    impl RecordingNotifier {
        pub fn texts(&self) -> Vec<String> {
            self.posted
                .lock()
                .unwrap()
                .iter()
                .map(Message::fallback_text)
                .collect()
        }
    }

    #[async_trait]
    impl ChatNotifier for RecordingNotifier {
        async fn post_message(&self, message: &Message) -> Result<(), ChannelError> {
            self.posted.lock().unwrap().push(message.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::{FakeSensors, FakeWireless, RecordingNotifier};
    use super::*;
    use health::SensorRecord;

    fn dispatcher(sensors: FakeSensors) -> (Dispatcher, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let dispatcher = Dispatcher::new(
            Arc::new(sensors),
            Arc::new(FakeWireless::default()),
            notifier.clone(),
        );
        (dispatcher, notifier)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("<@U1> status 101").unwrap(),
            Command::Status {
                site_id: "101".into()
            }
        );
        assert_eq!(
            Command::parse("<@U1>  CLOVERS   204 ").unwrap(),
            Command::Clovers {
                site_id: "204".into()
            }
        );
        assert_eq!(
            Command::parse("<@U1> wifi AA-BB-CC-DD-EE-FF").unwrap(),
            Command::Wifi {
                mac_address: "aa:bb:cc:dd:ee:ff".into()
            }
        );
        assert_eq!(Command::parse("<@U1> help").unwrap(), Command::Help);
    }

    #[test]
    fn test_bare_mention_and_unknown_command_show_help() {
        assert_eq!(Command::parse("<@U1>").unwrap(), Command::Help);
        assert_eq!(Command::parse("<@U1> reboot 101").unwrap(), Command::Help);
    }

    #[test]
    fn test_argument_count() {
        let err = Command::parse("<@U1> status").unwrap_err();
        assert_eq!(
            err.user_message(),
            "Too few arguments - expecting 3, but got 2"
        );

        let err = Command::parse("<@U1> status 101 now").unwrap_err();
        assert_eq!(
            err.user_message(),
            "Too many arguments - expecting 3 but got 4"
        );
    }

    #[test]
    fn test_site_id_validation() {
        assert!(site_id("007").is_ok());
        for bad in ["12", "1234", "abc", "12a", "x123"] {
            assert_eq!(
                site_id(bad).unwrap_err().user_message(),
                "Invalid site ID - Must be a valid 3-digit ID"
            );
        }
    }

    #[test]
    fn test_mac_address_validation() {
        assert_eq!(
            mac_address("AA:bb:CC:dd:EE:ff").unwrap(),
            "aa:bb:cc:dd:ee:ff"
        );
        for bad in ["aa:bb:cc:dd:ee", "aabbccddeeff", "gg:bb:cc:dd:ee:ff"] {
            assert!(matches!(
                mac_address(bad),
                Err(CommandError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_handle_mention_posts_ack_then_reply() {
        let (dispatcher, notifier) = dispatcher(FakeSensors::default());
        dispatcher.handle_mention("<@U1>").await;

        let texts = notifier.texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0], ":repeat: Processing your request...");
        assert!(texts[1].contains("supports the following commands"));
    }

    #[tokio::test]
    async fn test_handle_mention_posts_single_error() {
        let (dispatcher, notifier) = dispatcher(FakeSensors {
            site_id: "101".into(),
            health: Some(SensorRecord::new("Probe", "101 - Main St", "Up", 3)),
            ..FakeSensors::default()
        });
        dispatcher.handle_mention("<@U1> status 999").await;

        let texts = notifier.texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(
            texts[1],
            ":exclamation: Error processing your request:\n\nProbe does not exist with site ID: 999"
        );
    }

    #[tokio::test]
    async fn test_validation_error_skips_lookups() {
        let (dispatcher, notifier) = dispatcher(FakeSensors::default());
        dispatcher.handle_mention("<@U1> clovers 1O1").await;

        let texts = notifier.texts();
        assert_eq!(texts.len(), 2);
        assert!(texts[1].ends_with("Invalid site ID - Must be a valid 3-digit ID"));
    }
}
