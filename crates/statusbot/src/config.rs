//! Configuration for the status bot service.

use std::env;
use std::time::Duration;

/// Default Slack Web API base URL.
const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Default Meraki Dashboard API base URL.
const DEFAULT_MERAKI_API_URL: &str = "https://api.meraki.com/api/v1";

/// Status bot configuration.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// Shared secret Slack sends in every event payload.
    pub slack_app_token: Option<String>,
    /// Bot OAuth token for posting messages.
    pub slack_oauth_token: Option<String>,
    /// Channel ID replies are posted to.
    pub slack_post_channel: Option<String>,
    /// Slack Web API base URL.
    pub slack_api_url: String,
    /// PRTG host name (e.g., "prtg.example.com").
    pub prtg_instance: Option<String>,
    /// PRTG API token.
    pub prtg_api_key: Option<String>,
    /// Meraki Dashboard API key.
    pub meraki_api_key: Option<String>,
    /// Meraki network holding the leaf device clients.
    pub meraki_network_id: Option<String>,
    /// Meraki Dashboard API base URL.
    pub meraki_api_url: String,
    /// Timeout for every outbound HTTP request.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: env::var("STATUSBOT_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            slack_app_token: non_empty("SLACK_APP_TOKEN"),
            slack_oauth_token: non_empty("SLACK_OAUTH_TOKEN"),
            slack_post_channel: non_empty("SLACK_POST_CHANNEL"),
            slack_api_url: env::var("SLACK_API_URL")
                .unwrap_or_else(|_| DEFAULT_SLACK_API_URL.to_string()),
            prtg_instance: non_empty("PRTG_INSTANCE_NAME"),
            prtg_api_key: non_empty("PRTG_API_KEY"),
            meraki_api_key: non_empty("MERAKI_API_KEY"),
            meraki_network_id: non_empty("MERAKI_NETWORK_ID"),
            meraki_api_url: env::var("MERAKI_API_URL")
                .unwrap_or_else(|_| DEFAULT_MERAKI_API_URL.to_string()),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

impl Config {
    /// Names of required environment variables that are not set.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("SLACK_APP_TOKEN", self.slack_app_token.is_none()),
            ("SLACK_OAUTH_TOKEN", self.slack_oauth_token.is_none()),
            ("SLACK_POST_CHANNEL", self.slack_post_channel.is_none()),
            ("PRTG_INSTANCE_NAME", self.prtg_instance.is_none()),
            ("PRTG_API_KEY", self.prtg_api_key.is_none()),
            ("MERAKI_API_KEY", self.meraki_api_key.is_none()),
            ("MERAKI_NETWORK_ID", self.meraki_network_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect()
    }

    /// PRTG table API URL for the configured instance.
    #[must_use]
    pub fn prtg_table_url(&self) -> Option<String> {
        self.prtg_instance
            .as_ref()
            .map(|host| format!("https://{host}/api/table.xml"))
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serialize tests that modify environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 11] = [
        "STATUSBOT_PORT",
        "SLACK_APP_TOKEN",
        "SLACK_OAUTH_TOKEN",
        "SLACK_POST_CHANNEL",
        "SLACK_API_URL",
        "PRTG_INSTANCE_NAME",
        "PRTG_API_KEY",
        "MERAKI_API_KEY",
        "MERAKI_NETWORK_ID",
        "MERAKI_API_URL",
        "REQUEST_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.slack_api_url, "https://slack.com/api");
        assert_eq!(config.meraki_api_url, "https://api.meraki.com/api/v1");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.missing().len(), 7);
        assert!(config.prtg_table_url().is_none());
    }

    #[test]
    fn test_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();

        env::set_var("STATUSBOT_PORT", "9000");
        env::set_var("SLACK_APP_TOKEN", "app-token");
        env::set_var("SLACK_OAUTH_TOKEN", "xoxb-token");
        env::set_var("SLACK_POST_CHANNEL", "C0123");
        env::set_var("PRTG_INSTANCE_NAME", "prtg.example.com");
        env::set_var("PRTG_API_KEY", "prtg-key");
        env::set_var("MERAKI_API_KEY", "meraki-key");
        env::set_var("MERAKI_NETWORK_ID", "N_1");
        env::set_var("REQUEST_TIMEOUT_SECS", "5");

        let config = Config::default();
        assert_eq!(config.port, 9000);
        assert!(config.missing().is_empty());
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(
            config.prtg_table_url().as_deref(),
            Some("https://prtg.example.com/api/table.xml")
        );

        clear_env();
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();

        env::set_var("SLACK_APP_TOKEN", "");

        let config = Config::default();
        assert!(config.slack_app_token.is_none());
        assert!(config.missing().contains(&"SLACK_APP_TOKEN"));

        clear_env();
    }
}
