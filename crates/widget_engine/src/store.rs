//! Append-only conversation store.

use widget_core::{Message, ReplyMetadata};

/// Ordered sequence of exchanged messages for one widget instance.
///
/// Sequence order equals causal send/receive order. Ordinals are assigned
/// here, strictly monotonic from 1, and never reused; messages are immutable
/// once appended and live until the instance is torn down.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    next_ordinal: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_ordinal: 1,
        }
    }

    /// Append a user message; returns a copy for broadcasting.
    pub fn append_user(&mut self, text: impl Into<String>) -> Message {
        let message = Message::user(self.take_ordinal(), text);
        tracing::debug!(ordinal = message.ordinal, "Conversation: user message appended");
        self.messages.push(message.clone());
        message
    }

    /// Append an assistant message (real or synthetic); returns a copy for
    /// broadcasting.
    pub fn append_assistant(
        &mut self,
        text: impl Into<String>,
        metadata: ReplyMetadata,
    ) -> Message {
        let message = Message::assistant(self.take_ordinal(), text, metadata);
        tracing::debug!(
            ordinal = message.ordinal,
            confidence = message.metadata.as_ref().map(|m| m.confidence),
            "Conversation: assistant message appended"
        );
        self.messages.push(message.clone());
        message
    }

    fn take_ordinal(&mut self) -> u64 {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        ordinal
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widget_core::{Language, Sender};

    #[test]
    fn ordinals_are_strictly_monotonic() {
        let mut conversation = Conversation::new();
        let first = conversation.append_user("Library timings?");
        let second =
            conversation.append_assistant("8am to 10pm.", ReplyMetadata::failure(Language::En));
        let third = conversation.append_user("And on Sundays?");

        assert_eq!(first.ordinal, 1);
        assert_eq!(second.ordinal, 2);
        assert_eq!(third.ordinal, 3);
    }

    #[test]
    fn store_order_is_append_order() {
        let mut conversation = Conversation::new();
        conversation.append_user("one");
        conversation.append_assistant("two", ReplyMetadata::failure(Language::En));

        let senders: Vec<Sender> = conversation.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Assistant]);
        assert_eq!(conversation.last().unwrap().text, "two");
        assert_eq!(conversation.len(), 2);
    }
}
