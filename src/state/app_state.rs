//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    scheduler::derive_plan,
    services::{habit, AudioScheduler, Notifier},
    utils::format_hms,
};
use super::{Effect, FocusSession, SessionEvent, SessionStatus};

/// Serializable view of the session for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub elapsed_seconds: u64,
    pub elapsed: String,
    pub naughtiness_index: u32,
}

/// Result of one handled control event
#[derive(Debug, Clone)]
pub struct EventOutcome {
    pub accepted: bool,
    pub snapshot: SessionSnapshot,
}

/// Main application state that owns the session and its collaborators
#[derive(Debug)]
pub struct AppState {
    /// The session state machine and its clock
    pub session: Arc<Mutex<FocusSession>>,
    /// Validated runtime configuration
    pub config: Config,
    /// Cue playback scheduling
    pub audio: AudioScheduler,
    /// User-facing notices
    pub notifier: Notifier,
    /// Server metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState from a normalized configuration
    pub fn new(config: Config) -> Self {
        let audio = AudioScheduler::new(config.player.clone());

        Self {
            session: Arc::new(Mutex::new(FocusSession::new(Utc::now()))),
            config,
            audio,
            notifier: Notifier::new(),
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Feed one control event through the state machine and dispatch its
    /// effects.
    ///
    /// Effects run while the session lock is held, so an overlapping
    /// control request cannot interleave its cue cancellation with our
    /// rescheduling.
    pub fn handle_event(&self, action: &str, event: SessionEvent) -> Result<EventOutcome, String> {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock session state: {}", e))?;

        let now = Utc::now();
        let transition = session.apply(event, now);
        debug!("Event '{}' -> {} (accepted: {})", action, transition.status.label(), transition.accepted);

        self.dispatch_effects(transition.effects);
        let snapshot = Self::snapshot_of(&session, now);
        drop(session);

        if transition.accepted {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(now);
            }
        }

        Ok(EventOutcome {
            accepted: transition.accepted,
            snapshot,
        })
    }

    /// Get a consistent snapshot of the session for status reporting
    pub fn session_snapshot(&self) -> Result<SessionSnapshot, String> {
        let session = self.session.lock()
            .map_err(|e| format!("Failed to lock session state: {}", e))?;

        Ok(Self::snapshot_of(&session, Utc::now()))
    }

    /// True exactly once per cycle, the first time the elapsed focus time
    /// reaches the configured session length
    pub fn deadline_reached(&self) -> Result<bool, String> {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock session state: {}", e))?;

        if session.elapsed_seconds(Utc::now()) >= self.config.session_length_secs() {
            Ok(session.arm_deadline_notice())
        } else {
            Ok(false)
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|action| action.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|time| *time);
        (last_action, last_action_time)
    }

    fn snapshot_of(session: &FocusSession, now: DateTime<Utc>) -> SessionSnapshot {
        let elapsed_seconds = session.elapsed_seconds(now);
        SessionSnapshot {
            status: session.status(),
            elapsed_seconds,
            elapsed: format_hms(elapsed_seconds),
            naughtiness_index: session.naughtiness_index(),
        }
    }

    fn dispatch_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notify { message, duration_ms } => {
                    self.notifier.notify(&message, duration_ms);
                }
                Effect::PlayImmediateCue => {
                    if let Some(url) = self.resolve_cue(self.config.cue_start.as_deref(), "break-start") {
                        self.audio.play_once(&url, 0);
                    }
                }
                Effect::ScheduleCues { deposited_seconds } => {
                    self.schedule_cues(deposited_seconds);
                }
                Effect::CancelCues => {
                    let cancelled = self.audio.cancel_all();
                    debug!("Cancelled {} pending cues", cancelled);
                }
                Effect::RecordHabit { seconds } => {
                    habit::record(seconds);
                }
            }
        }
    }

    fn schedule_cues(&self, deposited_seconds: u64) {
        let plan = derive_plan(
            self.config.session_length_secs(),
            deposited_seconds,
            self.config.min_interval_secs(),
            self.config.max_interval_secs(),
            self.config.short_break,
            &mut thread_rng(),
        );

        if plan.is_empty() {
            self.notifier.notify("Session budget already spent, no cues scheduled", 2000);
            return;
        }

        info!(
            "Scheduled {} cues over the next {} seconds",
            plan.cue_count(),
            plan.long_interval.unwrap_or(0)
        );

        if let Some(url) = self.resolve_cue(self.config.cue_start.as_deref(), "break-start") {
            self.audio.play_sequence(&url, &plan.interval_start);
        }
        if let Some(url) = self.resolve_cue(self.config.cue_end.as_deref(), "break-end") {
            self.audio.play_sequence(&url, &plan.interval_end);
        }
        if let Some(offset) = plan.long_interval {
            if let Some(url) = self.resolve_cue(self.config.cue_long.as_deref(), "long-break") {
                self.audio.play_once(&url, offset);
            }
        }
    }

    /// A missing cue slot is reported and skipped; the other cues still schedule
    fn resolve_cue(&self, url: Option<&str>, slot: &str) -> Option<String> {
        match url {
            Some(url) if !url.is_empty() => Some(url.to_string()),
            _ => {
                warn!("No {} cue audio configured", slot);
                self.notifier.notify(&format!("No {} cue audio configured, skipping", slot), 2000);
                None
            }
        }
    }
}
