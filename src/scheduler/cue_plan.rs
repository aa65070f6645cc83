//! Cue plan structure

use serde::{Deserialize, Serialize};

/// Offsets, in seconds from entering the running state, at which cues fire.
/// Produced once per entry into running and superseded on every exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuePlan {
    /// Break-start cues
    pub interval_start: Vec<u64>,
    /// Break-end cues, each trailing its break-start cue
    pub interval_end: Vec<u64>,
    /// The single cue marking the end of the whole remaining budget
    pub long_interval: Option<u64>,
}

impl CuePlan {
    /// Plan with nothing to schedule
    pub fn empty() -> Self {
        Self {
            interval_start: Vec::new(),
            interval_end: Vec::new(),
            long_interval: None,
        }
    }

    /// Check if the plan schedules no cues at all
    pub fn is_empty(&self) -> bool {
        self.interval_start.is_empty() && self.interval_end.is_empty() && self.long_interval.is_none()
    }

    /// Total number of cues this plan will fire
    pub fn cue_count(&self) -> usize {
        self.interval_start.len() + self.interval_end.len() + usize::from(self.long_interval.is_some())
    }
}
