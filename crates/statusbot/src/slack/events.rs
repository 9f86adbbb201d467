//! Inbound Slack Events API payloads.

use serde::Deserialize;
use subtle::ConstantTimeEq;

/// Handshake sent once when the events URL is configured.
pub const URL_VERIFICATION: &str = "url_verification";

/// Wrapper for every subscribed event.
pub const EVENT_CALLBACK: &str = "event_callback";

/// Outer envelope of an Events API request.
///
/// Every field is optional so the handler can answer malformed payloads with
/// a 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub token: Option<String>,
    pub challenge: Option<String>,
    pub event: Option<MentionEvent>,
}

impl EventEnvelope {
    /// Envelope type, if present and non-empty.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref().filter(|s| !s.is_empty())
    }

    /// Verification token, if present and non-empty.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|s| !s.is_empty())
    }

    /// Text of the wrapped mention, if any.
    #[must_use]
    pub fn mention_text(&self) -> Option<&str> {
        self.event
            .as_ref()
            .map(|event| event.text.as_str())
            .filter(|text| !text.trim().is_empty())
    }
}

/// An `app_mention` event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentionEvent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    pub user: Option<String>,
    pub channel: Option<String>,
}

/// Compare the payload token with the configured one in constant time.
#[must_use]
pub fn verify_token(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_callback() {
        let body = r#"{
            "token": "secret",
            "type": "event_callback",
            "event": {
                "type": "app_mention",
                "text": "<@U123> status 101",
                "user": "U999",
                "channel": "C1"
            }
        }"#;

        let envelope: EventEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.kind(), Some(EVENT_CALLBACK));
        assert_eq!(envelope.token(), Some("secret"));
        assert_eq!(envelope.mention_text(), Some("<@U123> status 101"));
        assert_eq!(envelope.event.unwrap().kind, "app_mention");
    }

    #[test]
    fn test_empty_fields_are_absent() {
        let envelope: EventEnvelope =
            serde_json::from_str(r#"{"type": "", "token": ""}"#).unwrap();
        assert!(envelope.kind().is_none());
        assert!(envelope.token().is_none());
        assert!(envelope.mention_text().is_none());
    }

    #[test]
    fn test_verify_token() {
        assert!(verify_token("secret", "secret"));
        assert!(!verify_token("secret", "secreT"));
        assert!(!verify_token("secret", "secret-longer"));
        assert!(!verify_token("", "secret"));
    }
}
