//! Typed Block Kit message model.
//!
//! Guidelines for Slack message formatting:
//! <https://api.slack.com/reference/surfaces/formatting>

use serde::Serialize;

/// A Slack message made of Block Kit blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Message {
    pub blocks: Vec<Block>,
}

impl Message {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    #[must_use]
    pub fn with(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Plain-text rendering of every block, used as the notification fallback.
    #[must_use]
    pub fn fallback_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Header { text } => Some(text.text.clone()),
                Block::Section { text: Some(text), .. } => Some(text.text.clone()),
                Block::Section { text: None, .. } | Block::Divider => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Block Kit layout block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Large bold header
    Header { text: Text },
    /// Section with a text body and/or a two-column field grid
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<Text>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        fields: Vec<Text>,
    },
    /// Divider line
    Divider,
}

impl Block {
    /// Plain-text header.
    #[must_use]
    pub fn header(text: impl Into<String>) -> Self {
        Self::Header {
            text: Text::plain(text),
        }
    }

    /// Section with a single text body.
    #[must_use]
    pub fn section(text: Text) -> Self {
        Self::Section {
            text: Some(text),
            fields: vec![],
        }
    }

    /// Section laid out as `*name:*` / value field pairs.
    #[must_use]
    pub fn fields<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: std::fmt::Display,
        V: std::fmt::Display,
    {
        Self::Section {
            text: None,
            fields: pairs
                .into_iter()
                .map(|(name, value)| Text::mrkdwn(format!("*{name}:*\n{value}")))
                .collect(),
        }
    }
}

/// Block Kit text object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    #[serde(rename = "type")]
    pub text_type: TextType,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextType {
    PlainText,
    Mrkdwn,
}

impl Text {
    /// Plain text; emoji shortcodes are left as typed.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text_type: TextType::PlainText,
            text: text.into(),
            emoji: Some(false),
        }
    }

    /// Plain text with emoji shortcodes rendered.
    #[must_use]
    pub fn plain_emoji(text: impl Into<String>) -> Self {
        Self {
            text_type: TextType::PlainText,
            text: text.into(),
            emoji: Some(true),
        }
    }

    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            text_type: TextType::Mrkdwn,
            text: text.into(),
            emoji: None,
        }
    }
}
