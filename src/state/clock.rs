//! Session clock for elapsed-time accounting

use chrono::{DateTime, Utc};

/// Tracks cumulative focus seconds across the pause/resume boundaries of
/// one session cycle
#[derive(Debug, Clone)]
pub struct SessionClock {
    last_transition: DateTime<Utc>,
    deposited_seconds: u64,
}

impl SessionClock {
    /// Create a clock with an empty deposit
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_transition: now,
            deposited_seconds: 0,
        }
    }

    /// Record `now` as the most recent state-change instant
    pub fn mark_transition(&mut self, now: DateTime<Utc>) {
        self.last_transition = now;
    }

    /// Fold the seconds since the last transition into the deposit.
    ///
    /// Must run exactly once per exit from the running state, before the
    /// next `mark_transition`. A negative difference (clock skew) counts
    /// as zero, so the deposit never decreases.
    pub fn append_elapsed(&mut self, now: DateTime<Utc>) {
        self.deposited_seconds += self.delta_seconds(now);
    }

    /// Seconds of focus accumulated so far; includes the in-flight span
    /// while running. Pure read, safe to call repeatedly.
    pub fn current_elapsed(&self, now: DateTime<Utc>, running: bool) -> u64 {
        if running {
            self.deposited_seconds + self.delta_seconds(now)
        } else {
            self.deposited_seconds
        }
    }

    /// Seconds already banked by completed running spans
    pub fn deposited_seconds(&self) -> u64 {
        self.deposited_seconds
    }

    /// Zero the deposit for the next cycle; only valid after the final
    /// `append_elapsed` of the current one
    pub fn reset(&mut self) {
        self.deposited_seconds = 0;
    }

    fn delta_seconds(&self, now: DateTime<Utc>) -> u64 {
        let millis = now.signed_duration_since(self.last_transition).num_milliseconds();
        millis.max(0) as u64 / 1000
    }
}
