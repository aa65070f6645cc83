//! Collaborator services module
//!
//! Audio cue playback, user notices, and the habit data sink. The session
//! core computes when cues should fire; these services own the doing.

pub mod audio;
pub mod habit;
pub mod notify;

// Re-export main types
pub use audio::{check_player_available, AudioScheduler};
pub use notify::Notifier;
