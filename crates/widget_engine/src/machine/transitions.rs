//! State transitions - event-driven transition logic for the widget.

use widget_core::Language;

use super::events::WidgetEvent;
use super::states::{InteractionState, WidgetPhase};

/// Represents a state transition result.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The phase before the transition.
    pub from: WidgetPhase,
    /// The phase after the transition.
    pub to: WidgetPhase,
    /// The event that triggered the transition.
    pub event: WidgetEvent,
    /// Whether any part of the state changed (phase or flags).
    pub changed: bool,
}

/// State machine for one widget instance.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: InteractionState,
    /// Transition history (limited).
    history: Vec<StateTransition>,
    max_history: usize,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine: closed, welcome visible, English.
    pub fn new() -> Self {
        Self {
            state: InteractionState::default(),
            history: Vec::new(),
            max_history: 50,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn phase(&self) -> WidgetPhase {
        self.state.phase()
    }

    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Change the language attached to subsequent outbound turns. Stored
    /// messages are untouched and no turn is triggered.
    pub fn select_language(&mut self, language: Language) {
        if self.state.selected_language != language {
            tracing::debug!(
                from = %self.state.selected_language,
                to = %language,
                "FSM: language selected"
            );
            self.state.selected_language = language;
        }
    }

    /// Handle an event and transition to a new state.
    pub fn handle_event(&mut self, event: WidgetEvent) -> StateTransition {
        let before = self.state.clone();

        match &event {
            WidgetEvent::Toggled => {
                if self.state.open {
                    self.state.open = false;
                } else {
                    self.state.open = true;
                    // Opening dismisses the unread indicator for good.
                    self.state.unread_notification_visible = false;
                    self.state.notification_dismissed = true;
                }
            }
            WidgetEvent::TurnStarted => {
                // The single concurrency guard: only an idle, open widget
                // may start a turn. Everything else is a silent no-op.
                if before.phase() == WidgetPhase::OpenIdle {
                    self.state.typing = true;
                    self.state.welcome_visible = false;
                }
            }
            WidgetEvent::TurnFinished => {
                // Unconditional, success or failure, open or closed: the
                // widget must never stay stuck waiting.
                self.state.typing = false;
            }
            WidgetEvent::NotificationDelayElapsed => {
                if before.phase() == WidgetPhase::Closed && !self.state.notification_dismissed {
                    self.state.unread_notification_visible = true;
                }
            }
        }

        let changed = before != self.state;
        let transition = StateTransition {
            from: before.phase(),
            to: self.state.phase(),
            event,
            changed,
        };

        if changed {
            tracing::info!(
                from = ?transition.from,
                to = ?transition.to,
                event = ?transition.event,
                "FSM: state transition"
            );
        } else {
            tracing::debug!(
                phase = ?transition.from,
                event = ?transition.event,
                "FSM: event did not change state"
            );
        }

        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_then_closes() {
        let mut sm = StateMachine::new();
        assert_eq!(sm.phase(), WidgetPhase::Closed);

        let t1 = sm.handle_event(WidgetEvent::Toggled);
        assert!(t1.changed);
        assert_eq!(sm.phase(), WidgetPhase::OpenIdle);

        let t2 = sm.handle_event(WidgetEvent::Toggled);
        assert!(t2.changed);
        assert_eq!(sm.phase(), WidgetPhase::Closed);
    }

    #[test]
    fn turn_start_requires_open_idle() {
        let mut sm = StateMachine::new();

        // Closed: dropped.
        let t = sm.handle_event(WidgetEvent::TurnStarted);
        assert!(!t.changed);
        assert_eq!(sm.phase(), WidgetPhase::Closed);

        sm.handle_event(WidgetEvent::Toggled);
        let t = sm.handle_event(WidgetEvent::TurnStarted);
        assert!(t.changed);
        assert_eq!(sm.phase(), WidgetPhase::OpenWaiting);

        // Already waiting: dropped. This is the single-flight guard.
        let t = sm.handle_event(WidgetEvent::TurnStarted);
        assert!(!t.changed);
        assert_eq!(sm.phase(), WidgetPhase::OpenWaiting);
    }

    #[test]
    fn turn_finish_is_unconditional() {
        let mut sm = StateMachine::new();
        sm.handle_event(WidgetEvent::Toggled);
        sm.handle_event(WidgetEvent::TurnStarted);

        // Close mid-flight; the in-flight marker must survive ...
        sm.handle_event(WidgetEvent::Toggled);
        assert_eq!(sm.phase(), WidgetPhase::Closed);
        assert!(sm.state().typing);

        // ... and reopening must not allow a second turn.
        sm.handle_event(WidgetEvent::Toggled);
        assert_eq!(sm.phase(), WidgetPhase::OpenWaiting);
        let t = sm.handle_event(WidgetEvent::TurnStarted);
        assert!(!t.changed);

        let t = sm.handle_event(WidgetEvent::TurnFinished);
        assert!(t.changed);
        assert_eq!(sm.phase(), WidgetPhase::OpenIdle);
    }

    #[test]
    fn welcome_flips_once_on_first_turn() {
        let mut sm = StateMachine::new();
        sm.handle_event(WidgetEvent::Toggled);
        assert!(sm.state().welcome_visible);

        sm.handle_event(WidgetEvent::TurnStarted);
        assert!(!sm.state().welcome_visible);

        sm.handle_event(WidgetEvent::TurnFinished);
        sm.handle_event(WidgetEvent::TurnStarted);
        assert!(!sm.state().welcome_visible);
    }

    #[test]
    fn notification_shows_only_while_closed_and_undismissed() {
        let mut sm = StateMachine::new();

        let t = sm.handle_event(WidgetEvent::NotificationDelayElapsed);
        assert!(t.changed);
        assert!(sm.state().unread_notification_visible);

        // Opening clears it permanently.
        sm.handle_event(WidgetEvent::Toggled);
        assert!(!sm.state().unread_notification_visible);
        assert!(sm.state().notification_dismissed);

        // A later timer fire while closed again stays a no-op.
        sm.handle_event(WidgetEvent::Toggled);
        let t = sm.handle_event(WidgetEvent::NotificationDelayElapsed);
        assert!(!t.changed);
        assert!(!sm.state().unread_notification_visible);
    }

    #[test]
    fn notification_skipped_if_open_at_fire_time() {
        let mut sm = StateMachine::new();
        sm.handle_event(WidgetEvent::Toggled);

        let t = sm.handle_event(WidgetEvent::NotificationDelayElapsed);
        assert!(!t.changed);
        assert!(!sm.state().unread_notification_visible);
    }

    #[test]
    fn language_selection_does_not_touch_phase() {
        let mut sm = StateMachine::new();
        sm.select_language(Language::Hi);
        assert_eq!(sm.state().selected_language, Language::Hi);
        assert_eq!(sm.phase(), WidgetPhase::Closed);
        assert!(sm.history().is_empty());
    }

    #[test]
    fn history_tracking() {
        let mut sm = StateMachine::new();
        sm.handle_event(WidgetEvent::Toggled);
        sm.handle_event(WidgetEvent::TurnStarted);

        assert_eq!(sm.history().len(), 2);
        assert_eq!(sm.history()[0].from, WidgetPhase::Closed);
        assert_eq!(sm.history()[1].to, WidgetPhase::OpenWaiting);
    }
}
