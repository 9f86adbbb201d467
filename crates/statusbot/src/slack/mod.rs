//! Slack integration: inbound events, Block Kit messages and the notifier.

pub mod blocks;
pub mod events;
pub mod notifier;

use async_trait::async_trait;
use thiserror::Error;

pub use blocks::{Block, Message, Text};
pub use events::{verify_token, EventEnvelope, MentionEvent};
pub use notifier::SlackNotifier;

use crate::format;

/// Errors that can occur when posting to the chat service.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `ok: false`
    #[error("Slack API error: {0}")]
    Api(String),

    /// Rate limited by the service
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Destination for command replies.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// Post a message to the reply channel.
    async fn post_message(&self, message: &Message) -> Result<(), ChannelError>;

    /// Post the single error message a failed command produces.
    async fn post_error(&self, reason: &str) -> Result<(), ChannelError> {
        self.post_message(&format::error_message(reason)).await
    }

    /// Tell the user the request is being processed.
    async fn post_ack(&self) -> Result<(), ChannelError> {
        self.post_message(&format::acknowledgement()).await
    }
}
