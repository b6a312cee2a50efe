//! Events that drive the widget interaction state machine.

/// An input the state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The visitor clicked the chat bubble or the close button.
    Toggled,

    /// A conversation turn is about to be dispatched. Legal only while the
    /// widget is open and idle; anything else is a no-op.
    TurnStarted,

    /// The in-flight turn resolved, successfully or not.
    TurnFinished,

    /// The post-mount notification delay elapsed.
    NotificationDelayElapsed,
}
