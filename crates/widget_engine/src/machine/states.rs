//! Widget states - visibility, in-flight marker, and per-instance flags.

use serde::{Deserialize, Serialize};
use widget_core::Language;

/// The coarse phase a widget instance is in.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WidgetPhase {
    /// Only the chat bubble is visible.
    Closed,

    /// The window is open and ready for input.
    OpenIdle,

    /// The window is open and a turn is in flight.
    OpenWaiting,
}

impl WidgetPhase {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether a new turn may start in this phase.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::OpenIdle)
    }

    /// Get a human-readable description of the current phase.
    pub fn description(&self) -> &str {
        match self {
            Self::Closed => "Minimized",
            Self::OpenIdle => "Ready for input",
            Self::OpenWaiting => "Waiting for assistant reply",
        }
    }
}

/// Full interaction state of one widget instance.
///
/// `open` and `typing` are independent flags: closing the window while a
/// turn is in flight must not clear the in-flight marker, or reopening
/// could start a second concurrent turn.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InteractionState {
    pub open: bool,

    /// True exactly while one dispatcher turn is in flight.
    pub typing: bool,

    pub unread_notification_visible: bool,

    /// Set on first open; permanently suppresses the unread indicator.
    pub notification_dismissed: bool,

    /// True until the first turn ever starts.
    pub welcome_visible: bool,

    pub selected_language: Language,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            open: false,
            typing: false,
            unread_notification_visible: false,
            notification_dismissed: false,
            welcome_visible: true,
            selected_language: Language::default(),
        }
    }
}

impl InteractionState {
    /// The phase derived from the `open`/`typing` flags.
    pub fn phase(&self) -> WidgetPhase {
        match (self.open, self.typing) {
            (false, _) => WidgetPhase::Closed,
            (true, false) => WidgetPhase::OpenIdle,
            (true, true) => WidgetPhase::OpenWaiting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_closed_with_welcome() {
        let state = InteractionState::default();
        assert_eq!(state.phase(), WidgetPhase::Closed);
        assert!(state.welcome_visible);
        assert!(!state.unread_notification_visible);
        assert_eq!(state.selected_language, Language::En);
    }

    #[test]
    fn phase_derivation_keeps_typing_across_close() {
        let state = InteractionState {
            open: false,
            typing: true,
            ..Default::default()
        };
        // Closed wins for presentation, but the in-flight marker survives.
        assert_eq!(state.phase(), WidgetPhase::Closed);
        assert!(state.typing);
    }

    #[test]
    fn only_open_idle_accepts_input() {
        assert!(WidgetPhase::OpenIdle.accepts_input());
        assert!(!WidgetPhase::Closed.accepts_input());
        assert!(!WidgetPhase::OpenWaiting.accepts_input());
    }
}
