//! State management module
//!
//! The session state machine, its clock, and the shared application state.

pub mod app_state;
pub mod clock;
pub mod session;

// Re-export main types
pub use app_state::{AppState, EventOutcome, SessionSnapshot};
pub use clock::SessionClock;
pub use session::{Effect, FocusSession, SessionEvent, SessionStatus, Transition};
