//! Slack Web API notifier.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::blocks::Message;
use super::{ChannelError, ChatNotifier};

/// Posts messages to one channel through `chat.postMessage`.
pub struct SlackNotifier {
    client: reqwest::Client,
    api_url: String,
    oauth_token: String,
    channel: String,
}

impl SlackNotifier {
    /// Create a notifier for `channel`.
    ///
    /// `api_url` is the Web API base, e.g. `https://slack.com/api`.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        oauth_token: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            oauth_token: oauth_token.into(),
            channel: channel.into(),
        }
    }
}

#[async_trait]
impl ChatNotifier for SlackNotifier {
    async fn post_message(&self, message: &Message) -> Result<(), ChannelError> {
        let payload = PostMessage {
            channel: &self.channel,
            text: message.fallback_text(),
            blocks: message,
        };

        debug!(channel = %self.channel, blocks = message.blocks.len(), "Posting message");

        let response = self
            .client
            .post(format!("{}/chat.postMessage", self.api_url))
            .bearer_auth(&self.oauth_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(5);

            warn!(retry_after_secs = retry_after, "Rate limited by Slack");

            return Err(ChannelError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Slack request failed");
            return Err(ChannelError::Other(format!("Slack returned {status}: {body}")));
        }

        let reply: ApiReply = response.json().await?;
        if reply.ok {
            debug!("Message posted");
            Ok(())
        } else {
            let error = reply.error.unwrap_or_else(|| "unknown_error".to_string());
            warn!(error = %error, "Slack rejected message");
            Err(ChannelError::Api(error))
        }
    }
}

#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    /// Fallback for notifications
    text: String,
    #[serde(flatten)]
    blocks: &'a Message,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    error: Option<String>,
}
