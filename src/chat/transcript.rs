//! Chat transcript entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const GREETING: &str = "Welcome! I'm Agri-Assistant. I can help you understand our yield prediction tool. What's your first question?";

/// Topic of a structured reply segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Climate,
    Yield,
    Advisory,
    Nutrition,
    Schemes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub title: String,
    pub content: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, is_bot: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_bot,
            timestamp: Utc::now(),
            segments: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// The opening message of a fresh transcript.
    pub fn greeting() -> Self {
        Self {
            id: "1".to_string(),
            ..Self::bot(GREETING)
        }
    }
}
