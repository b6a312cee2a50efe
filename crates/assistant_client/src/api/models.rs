//! Wire models for the assistant `/chat` endpoint.

use serde::{Deserialize, Serialize};
use widget_core::Language;

/// Body of one outbound turn.
///
/// `session_id` is serialized as `null` when no session exists yet; the
/// service treats that as a request to start one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub language: Language,
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, language: Language, session_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            language,
            session_id,
        }
    }
}

/// Successful reply body.
///
/// `message_id` and `category` are produced by the service but not acted on
/// by the engine core.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatReply {
    pub response: String,

    pub confidence: f64,

    /// Wire code of the detected language; may fall outside the widget's
    /// supported set, so it stays a plain string here.
    pub detected_language: String,

    #[serde(default)]
    pub suggested_questions: Vec<String>,

    #[serde(default)]
    pub fallback_to_human: bool,

    /// Session id the service wants subsequent turns to carry.
    pub session_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_null_session_id() {
        let request = ChatRequest::new("Library timings?", Language::En, None);
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["message"], "Library timings?");
        assert_eq!(json["language"], "en");
        assert!(json["session_id"].is_null());
    }

    #[test]
    fn reply_defaults_optional_fields() {
        let reply: ChatReply = serde_json::from_str(
            r#"{
                "response": "The library is open 8am-10pm.",
                "confidence": 0.87,
                "detected_language": "en",
                "session_id": "srv-1"
            }"#,
        )
        .expect("deserialize");

        assert!(reply.suggested_questions.is_empty());
        assert!(!reply.fallback_to_human);
        assert!(reply.message_id.is_none());
        assert!(reply.category.is_none());
    }
}
