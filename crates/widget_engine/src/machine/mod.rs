//! Interaction state machine for a widget instance.

mod events;
mod states;
mod transitions;

pub use events::WidgetEvent;
pub use states::{InteractionState, WidgetPhase};
pub use transitions::{StateMachine, StateTransition};
