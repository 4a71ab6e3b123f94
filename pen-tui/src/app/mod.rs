//! Application module
//!
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: pure function (State, Action) -> State
//! - Event: terminal input polling

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::{Action, Effect};
pub use reducer::{key_action, reduce};
pub use state::{AppState, StatusBarState, UiConfig};
