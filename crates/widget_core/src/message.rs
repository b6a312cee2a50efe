//! Message types shared by the conversation store and the transport layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Who produced a message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// Metadata attached to assistant messages, built from the service reply.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReplyMetadata {
    /// Match confidence reported by the service, in `[0, 1]`.
    pub confidence: f64,

    /// Language the service detected in the user's message.
    pub detected_language: Language,

    /// Follow-up questions the user may tap next; possibly empty.
    #[serde(default)]
    pub suggestions: Vec<String>,

    /// Whether the service recommends handing off to a human.
    #[serde(default)]
    pub fallback_to_human: bool,
}

impl ReplyMetadata {
    /// Metadata for a locally synthesized failure message.
    ///
    /// `language` is the currently selected language, since no reply was
    /// available to detect one from.
    pub fn failure(language: Language) -> Self {
        Self {
            confidence: 0.0,
            detected_language: language,
            suggestions: Vec::new(),
            fallback_to_human: true,
        }
    }
}

/// A single conversation entry, immutable once appended to the store.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    /// Store-assigned ordinal, strictly monotonic from 1.
    pub ordinal: u64,

    pub text: String,

    pub sender: Sender,

    pub timestamp: DateTime<Utc>,

    /// Present on assistant messages only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReplyMetadata>,
}

impl Message {
    /// Create a user message.
    pub fn user(ordinal: u64, text: impl Into<String>) -> Self {
        Self {
            ordinal,
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    /// Create an assistant message with its reply metadata.
    pub fn assistant(ordinal: u64, text: impl Into<String>, metadata: ReplyMetadata) -> Self {
        Self {
            ordinal,
            text: text.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            metadata: Some(metadata),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_metadata_is_zero_confidence_fallback() {
        let meta = ReplyMetadata::failure(Language::Hi);
        assert_eq!(meta.confidence, 0.0);
        assert_eq!(meta.detected_language, Language::Hi);
        assert!(meta.suggestions.is_empty());
        assert!(meta.fallback_to_human);
    }

    #[test]
    fn user_message_serializes_without_metadata() {
        let message = Message::user(1, "Library timings?");
        let json = serde_json::to_value(&message).expect("serialize");
        assert!(json.get("metadata").is_none());
        assert_eq!(json["sender"], "user");
        assert_eq!(json["ordinal"], 1);
    }

    #[test]
    fn assistant_message_round_trips() {
        let meta = ReplyMetadata {
            confidence: 0.92,
            detected_language: Language::En,
            suggestions: vec!["When is the fee deadline?".to_string()],
            fallback_to_human: false,
        };
        let message = Message::assistant(2, "The library is open 8am-10pm.", meta.clone());

        let serialized = serde_json::to_string(&message).expect("serialize");
        let deserialized: Message = serde_json::from_str(&serialized).expect("deserialize");

        assert!(deserialized.is_assistant());
        assert_eq!(deserialized.metadata, Some(meta));
    }
}
