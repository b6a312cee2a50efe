//! Structured updates and the subscriber fan-out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, RwLock};
use widget_core::Message;

use crate::machine::{InteractionState, WidgetPhase};

/// Represents a structured update a rendering layer can consume to keep an
/// accurate replica of one widget instance. Each update captures the latest
/// phase transition, the appended message if any, and a full state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetUpdate {
    /// The phase after applying this update.
    pub phase: WidgetPhase,

    /// The phase before applying this update (if a transition occurred).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_phase: Option<WidgetPhase>,

    /// Message appended by this update, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// Full interaction state after the update.
    pub snapshot: InteractionState,

    /// Timestamp when the update was produced.
    pub timestamp: DateTime<Utc>,
}

const CHANNEL_CAPACITY: usize = 32;

/// Fans widget updates out to subscribed rendering layers.
///
/// Subscribers that stop receiving are dropped at the next broadcast.
#[derive(Clone)]
pub struct UpdateBroadcaster {
    subscribers: Arc<RwLock<Vec<mpsc::Sender<WidgetUpdate>>>>,
}

impl UpdateBroadcaster {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a subscriber; returns the receiving end of its channel.
    pub async fn subscribe(&self) -> mpsc::Receiver<WidgetUpdate> {
        let (tx, rx) = mpsc::channel::<WidgetUpdate>(CHANNEL_CAPACITY);

        let mut subscribers = self.subscribers.write().await;
        subscribers.push(tx);

        tracing::debug!(
            subscriber_count = subscribers.len(),
            "Broadcaster: subscriber added"
        );

        rx
    }

    /// Deliver an update to every live subscriber, dropping dead ones.
    pub async fn broadcast(&self, update: WidgetUpdate) {
        let mut subscribers = self.subscribers.write().await;
        subscribers.retain(|sender| sender.try_send(update.clone()).is_ok());

        tracing::debug!(
            active_subscribers = subscribers.len(),
            "Broadcaster: update delivered"
        );
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

impl Default for UpdateBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
