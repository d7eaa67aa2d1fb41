//! App layer - screen state management and command processing
//!
//! The App actor receives UI events and store updates,
//! updates screen state, calls the store and emits render state.

pub mod state;
pub mod actor;
pub mod commands;

pub use state::ScreenState;
pub use actor::AppActor;
