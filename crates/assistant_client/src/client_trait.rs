//! Transport seam between the widget engine and the assistant service.

use async_trait::async_trait;

use crate::api::models::{ChatReply, ChatRequest};
use crate::error::Result;

/// Sends one conversation turn and awaits the reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply>;
}
