//! widget_engine - session and message-exchange engine of the campus
//! assistant chat widget
//!
//! The engine owns everything with state and control flow: session identity,
//! the interaction state machine, the append-only conversation store, update
//! broadcasting, and the dispatcher that exchanges one turn at a time with
//! the remote assistant service. Rendering is a subscriber concern and lives
//! outside this crate.

pub mod events;
pub mod machine;
pub mod session;
pub mod store;
pub mod timer;
pub mod widget;

// Re-export commonly used types
pub use events::{UpdateBroadcaster, WidgetUpdate};
pub use machine::{InteractionState, StateMachine, StateTransition, WidgetEvent, WidgetPhase};
pub use session::Session;
pub use store::Conversation;
pub use widget::{ChatWidget, FAILURE_REPLY};
