//! Application module
//!
//! Contains the core application architecture:
//! - Actions: What can happen
//! - Keymap: Which action a key press means on the current screen
//! - State: What is true right now
//! - Reducer: Pure function (State, Action) -> State
//! - Effects: Service calls triggered by actions
//!
//! State transitions are pure; everything that touches the report store or
//! a device goes through `effects`.

pub mod actions;
pub mod effects;
pub mod event;
pub mod keymap;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::{Action, Alert, AlertKind, Capture, Screen};
pub use reducer::reduce;
pub use state::{AppState, CreateState, DashboardState, DetailState, LoginField, LoginState, UiConfig};
