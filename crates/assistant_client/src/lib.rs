//! assistant_client - HTTP client for the campus assistant chat service
//!
//! One request/reply pair per conversation turn, no streaming. The widget
//! engine consumes this crate through the [`ChatTransport`] trait so tests
//! can substitute a scripted transport.

pub mod api;
pub mod client_trait;
pub mod error;

// Re-export commonly used types
pub use api::client::AssistantClient;
pub use api::models::{ChatReply, ChatRequest};
pub use client_trait::ChatTransport;
pub use error::{ClientError, Result};
