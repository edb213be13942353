//! Per-chat session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;
pub mod view;


pub use effect::{Button, ButtonAction, Effect, Keyboard, Render};
pub use event::{CallbackData, Event, FetchOutcome, MenuTarget};
pub use state::{Screen, SessionState};
pub use transition::transition;
