//! The widget instance: public surface and the message dispatcher.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;

use assistant_client::{AssistantClient, ChatRequest, ChatTransport};
use widget_core::{Language, Message, ReplyMetadata, WidgetConfig};

use crate::events::{UpdateBroadcaster, WidgetUpdate};
use crate::machine::{InteractionState, StateMachine, WidgetEvent, WidgetPhase};
use crate::session::Session;
use crate::store::Conversation;
use crate::timer;

/// Fixed apology text for a synthesized failure reply.
pub const FAILURE_REPLY: &str = "Sorry, I encountered an error. Please try again later.";

/// One mounted chat widget instance.
///
/// Owns the conversation store, the interaction state machine, and the
/// session identity exclusively. Rendering layers observe it through
/// [`ChatWidget::subscribe`] or by polling [`ChatWidget::snapshot`] and
/// [`ChatWidget::messages`]; nothing here is coupled to a UI framework.
pub struct ChatWidget {
    inner: Arc<WidgetInner>,
}

struct WidgetInner {
    config: WidgetConfig,
    transport: Arc<dyn ChatTransport>,
    /// Lock ordering: machine before conversation before session. Keep
    /// scopes minimal; never hold a lock across the outbound request.
    machine: RwLock<StateMachine>,
    conversation: RwLock<Conversation>,
    session: RwLock<Session>,
    broadcaster: UpdateBroadcaster,
    cancel: CancellationToken,
}

impl Drop for WidgetInner {
    fn drop(&mut self) {
        // Tears down any pending deferred timers.
        self.cancel.cancel();
    }
}

impl ChatWidget {
    /// Mount a widget talking to the service named in `config`.
    ///
    /// Must be called within a tokio runtime: mounting schedules the
    /// unread-notification timer.
    pub fn mount(config: WidgetConfig) -> Self {
        let transport = Arc::new(AssistantClient::from_config(&config));
        Self::mount_with_transport(config, transport)
    }

    /// Mount with an injected transport. Tests script this seam.
    pub fn mount_with_transport(config: WidgetConfig, transport: Arc<dyn ChatTransport>) -> Self {
        let session = Session::generate();
        tracing::info!(
            session_id = %session.id(),
            api_base_url = %config.api_base_url,
            "Widget: mounted"
        );

        let inner = Arc::new(WidgetInner {
            config,
            transport,
            machine: RwLock::new(StateMachine::new()),
            conversation: RwLock::new(Conversation::new()),
            session: RwLock::new(session),
            broadcaster: UpdateBroadcaster::new(),
            cancel: CancellationToken::new(),
        });

        // Unread indicator: fires once, a fixed delay after mount; the state
        // machine ignores it unless the widget is still closed and has never
        // been opened.
        let weak = Arc::downgrade(&inner);
        timer::defer(
            inner.config.timing.notification_delay(),
            inner.cancel.child_token(),
            move || async move {
                if let Some(inner) = weak.upgrade() {
                    let transition = {
                        let mut machine = inner.machine.write().await;
                        machine.handle_event(WidgetEvent::NotificationDelayElapsed)
                    };
                    if transition.changed {
                        inner.broadcast(Some(transition.from), None).await;
                    }
                }
            },
        );

        Self { inner }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    /// Copy of the current interaction state, for polling consumers.
    pub async fn snapshot(&self) -> InteractionState {
        self.inner.machine.read().await.state().clone()
    }

    /// Copy of the conversation so far, in send/receive order.
    pub async fn messages(&self) -> Vec<Message> {
        self.inner.conversation.read().await.messages().to_vec()
    }

    /// The session id subsequent outbound turns will carry.
    pub async fn session_id(&self) -> String {
        self.inner.session.read().await.id().to_string()
    }

    /// Register an update subscriber (notify-on-change hook).
    pub async fn subscribe(&self) -> mpsc::Receiver<WidgetUpdate> {
        self.inner.broadcaster.subscribe().await
    }

    /// Open or close the chat window. Opening dismisses the unread
    /// indicator permanently.
    pub async fn toggle(&self) {
        let transition = {
            let mut machine = self.inner.machine.write().await;
            machine.handle_event(WidgetEvent::Toggled)
        };
        self.inner.broadcast(Some(transition.from), None).await;
    }

    /// Change the language attached to subsequent outbound turns. Stored
    /// messages are untouched and no turn is triggered.
    pub async fn select_language(&self, language: Language) {
        {
            let mut machine = self.inner.machine.write().await;
            machine.select_language(language);
        }
        self.inner.broadcast(None, None).await;
    }

    /// Dispatch one conversation turn. Empty input, calls while a turn is
    /// already in flight, and calls while the widget is closed are dropped
    /// silently, not queued.
    pub async fn send(&self, text: impl Into<String>) {
        self.inner.dispatch(text.into()).await;
    }

    /// A tapped suggestion chip is an ordinary send.
    pub async fn send_suggestion(&self, text: impl Into<String>) {
        self.inner.dispatch(text.into()).await;
    }

    /// A clicked quick-question tile. If the widget is closed it opens
    /// first, and the turn is deferred by the configured settle delay so the
    /// open animation can finish rendering.
    pub async fn click_quick_question(&self, question: impl Into<String>) {
        let question = question.into();

        let closed = !self.inner.machine.read().await.state().open;
        if !closed {
            self.inner.dispatch(question).await;
            return;
        }

        self.toggle().await;

        let weak = Arc::downgrade(&self.inner);
        timer::defer(
            self.inner.config.timing.open_settle(),
            self.inner.cancel.child_token(),
            move || async move {
                if let Some(inner) = weak.upgrade() {
                    inner.dispatch(question).await;
                }
            },
        );
    }
}

impl WidgetInner {
    /// The dispatch algorithm: claim the turn, append the user message,
    /// exchange one request/reply with the service, fold the outcome into
    /// the store, release the turn. Failures never escape this function.
    async fn dispatch(&self, text: String) {
        let text = text.trim().to_string();
        if text.is_empty() {
            tracing::debug!("Dispatcher: empty input dropped");
            return;
        }

        // Claim the turn before anything else. This is the single-flight
        // guard, applied synchronously before the request is issued.
        let started = {
            let mut machine = self.machine.write().await;
            machine.handle_event(WidgetEvent::TurnStarted)
        };
        if !started.changed {
            tracing::debug!(
                phase = ?started.from,
                "Dispatcher: send dropped, no turn permitted"
            );
            return;
        }

        // Optimistic append: the user message is visible before the request
        // departs and is never rolled back.
        let user_message = {
            let mut conversation = self.conversation.write().await;
            conversation.append_user(text.as_str())
        };
        self.broadcast(Some(started.from), Some(user_message)).await;

        let language = self.machine.read().await.state().selected_language;
        let session_id = self.session.read().await.id().to_string();
        let request = ChatRequest::new(text, language, Some(session_id));

        let assistant_message = match self.transport.send_chat(&request).await {
            Ok(reply) => {
                tracing::debug!(
                    confidence = reply.confidence,
                    session_id = %reply.session_id,
                    "Dispatcher: reply received"
                );
                self.session.write().await.adopt(reply.session_id.as_str());

                // An unknown detected code degrades to the selected language.
                let detected_language = reply.detected_language.parse().unwrap_or(language);
                let metadata = ReplyMetadata {
                    confidence: reply.confidence,
                    detected_language,
                    suggestions: reply.suggested_questions,
                    fallback_to_human: reply.fallback_to_human,
                };

                let mut conversation = self.conversation.write().await;
                conversation.append_assistant(reply.response, metadata)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Dispatcher: turn failed, synthesizing reply");

                let mut conversation = self.conversation.write().await;
                conversation.append_assistant(FAILURE_REPLY, ReplyMetadata::failure(language))
            }
        };

        // Unconditional: the widget must never stay stuck waiting.
        let finished = {
            let mut machine = self.machine.write().await;
            machine.handle_event(WidgetEvent::TurnFinished)
        };
        self.broadcast(Some(finished.from), Some(assistant_message))
            .await;
    }

    async fn broadcast(&self, previous_phase: Option<WidgetPhase>, message: Option<Message>) {
        let snapshot = self.machine.read().await.state().clone();
        let update = WidgetUpdate {
            phase: snapshot.phase(),
            previous_phase,
            message,
            snapshot,
            timestamp: Utc::now(),
        };
        self.broadcaster.broadcast(update).await;
    }
}
