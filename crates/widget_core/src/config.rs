use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default service endpoint when the host provides none.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

const CONFIG_FILE_PATH: &str = "widget.toml";

/// A quick-question tile shown in the welcome section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickQuestion {
    pub icon: String,
    /// Short label on the tile.
    pub label: String,
    /// Full question text sent when the tile is clicked.
    pub question: String,
}

impl QuickQuestion {
    pub fn new(
        icon: impl Into<String>,
        label: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            question: question.into(),
        }
    }
}

fn default_quick_questions() -> Vec<QuickQuestion> {
    vec![
        QuickQuestion::new(
            "📚",
            "Admission requirements?",
            "What are the admission requirements?",
        ),
        QuickQuestion::new("💰", "Fee deadline information?", "When is the fee deadline?"),
        QuickQuestion::new("📖", "Library timings?", "Library timings?"),
    ]
}

/// Delays for the widget's deferred behaviors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WidgetTiming {
    /// Delay after mount before the unread notification appears, in ms.
    #[serde(default = "default_notification_delay_ms")]
    pub notification_delay_ms: u64,

    /// Settle delay between opening the widget and dispatching a clicked
    /// quick question, in ms.
    #[serde(default = "default_open_settle_ms")]
    pub open_settle_ms: u64,
}

fn default_notification_delay_ms() -> u64 {
    3000
}

fn default_open_settle_ms() -> u64 {
    300
}

impl Default for WidgetTiming {
    fn default() -> Self {
        Self {
            notification_delay_ms: default_notification_delay_ms(),
            open_settle_ms: default_open_settle_ms(),
        }
    }
}

impl WidgetTiming {
    pub fn notification_delay(&self) -> Duration {
        Duration::from_millis(self.notification_delay_ms)
    }

    pub fn open_settle(&self) -> Duration {
        Duration::from_millis(self.open_settle_ms)
    }
}

/// Configuration the host page supplies to a widget instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Base URL of the assistant service.
    pub api_base_url: String,

    /// Advisory flag, not consumed by the engine core.
    #[serde(default = "default_true")]
    pub enable_feedback: bool,

    /// Advisory flag, not consumed by the engine core.
    #[serde(default = "default_true")]
    pub enable_analytics: bool,

    #[serde(default = "default_quick_questions")]
    pub quick_questions: Vec<QuickQuestion>,

    #[serde(default)]
    pub timing: WidgetTiming,
}

fn default_true() -> bool {
    true
}

fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl WidgetConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            enable_feedback: true,
            enable_analytics: true,
            quick_questions: default_quick_questions(),
            timing: WidgetTiming::default(),
        }
    }

    /// Load configuration from `widget.toml` in the working directory if it
    /// exists, then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::default();

        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            match std::fs::read_to_string(CONFIG_FILE_PATH) {
                Ok(content) => match toml::from_str::<WidgetConfig>(&content) {
                    Ok(file_config) => config = file_config,
                    Err(err) => log::warn!("Failed to parse {CONFIG_FILE_PATH}: {err}"),
                },
                Err(err) => log::warn!("Failed to read {CONFIG_FILE_PATH}: {err}"),
            }
        }

        if let Ok(api_base_url) = std::env::var("WIDGET_API_BASE_URL") {
            config.api_base_url = api_base_url;
        }
        if let Ok(value) = std::env::var("WIDGET_ENABLE_FEEDBACK") {
            config.enable_feedback = parse_bool_env(&value);
        }
        if let Ok(value) = std::env::var("WIDGET_ENABLE_ANALYTICS") {
            config.enable_analytics = parse_bool_env(&value);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_env_true_values() {
        for value in ["1", "true", "TRUE", " yes ", "Y", "on"] {
            assert!(parse_bool_env(value), "value {value:?} should be true");
        }
    }

    #[test]
    fn parse_bool_env_false_values() {
        for value in ["0", "false", "no", "off", "", "  "] {
            assert!(!parse_bool_env(value), "value {value:?} should be false");
        }
    }

    #[test]
    fn default_config_carries_three_quick_questions() {
        let config = WidgetConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.enable_feedback);
        assert!(config.enable_analytics);
        assert_eq!(config.quick_questions.len(), 3);
        assert_eq!(config.quick_questions[2].question, "Library timings?");
    }

    #[test]
    fn config_toml_fills_missing_fields_with_defaults() {
        let config: WidgetConfig =
            toml::from_str("api_base_url = \"http://campus.example:9000\"").expect("parse");
        assert_eq!(config.api_base_url, "http://campus.example:9000");
        assert!(config.enable_feedback);
        assert_eq!(config.timing.notification_delay_ms, 3000);
        assert_eq!(config.timing.open_settle_ms, 300);
    }
}
