use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use widget_core::WidgetConfig;

use crate::api::models::{ChatReply, ChatRequest};
use crate::client_trait::ChatTransport;
use crate::error::{ClientError, Result};

/// reqwest-backed transport for the assistant service.
///
/// No timeout and no retry are configured: a failed turn surfaces to the
/// widget as a synthetic message and the user resends manually.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    client: Client,
    base_url: String,
}

impl AssistantClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

#[async_trait]
impl ChatTransport for AssistantClient {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.chat_url();
        debug!(
            "POST {url} (language: {}, session: {:?})",
            request.language, request.session_id
        );

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!("Assistant service returned {status}: {body}");
            return Err(ClientError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let reply = serde_json::from_str::<ChatReply>(&body)?;
        debug!(
            "Reply received (confidence: {:.2}, session: {})",
            reply.confidence, reply.session_id
        );
        Ok(reply)
    }
}
