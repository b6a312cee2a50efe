//! widget_core - Core types and configuration for the campus assistant widget
//!
//! This crate provides the foundational types used across the widget crates:
//! - `message` - Message, Sender, ReplyMetadata
//! - `language` - the closed set of supported language codes
//! - `config` - the host-supplied widget configuration surface

pub mod config;
pub mod language;
pub mod message;

// Re-export commonly used types
pub use config::{QuickQuestion, WidgetConfig, WidgetTiming};
pub use language::Language;
pub use message::{Message, ReplyMetadata, Sender};
