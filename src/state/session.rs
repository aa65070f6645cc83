//! Focus session state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SessionClock;

/// Consecutive invalid presses at which the warning notice starts
const NAUGHTY_NOTICE_FLOOR: u32 = 7;
/// Last count that still gets the warning; beyond it the joke takes over
const NAUGHTY_NOTICE_CEILING: u32 = 18;

/// The three session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Ready,
    Running,
    Pause,
}

impl SessionStatus {
    /// Human-readable label used in notices and responses
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Ready => "ready",
            SessionStatus::Running => "running",
            SessionStatus::Pause => "paused",
        }
    }
}

/// Control events fed to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Pause,
    Stop,
}

/// Side effects a transition asks the caller to perform, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify { message: String, duration_ms: u64 },
    PlayImmediateCue,
    ScheduleCues { deposited_seconds: u64 },
    CancelCues,
    RecordHabit { seconds: u64 },
}

/// Outcome of feeding one event to the session
#[derive(Debug, Clone)]
pub struct Transition {
    pub accepted: bool,
    pub status: SessionStatus,
    pub effects: Vec<Effect>,
}

/// The session state machine plus the bookkeeping it owns.
///
/// `apply` never performs I/O; it mutates the clock and returns the
/// effects for the caller to dispatch, so transitions stay unit-testable.
#[derive(Debug, Clone)]
pub struct FocusSession {
    status: SessionStatus,
    clock: SessionClock,
    naughtiness_index: u32,
    deadline_notified: bool,
}

impl FocusSession {
    /// Create a session in the ready state
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            status: SessionStatus::Ready,
            clock: SessionClock::new(now),
            naughtiness_index: 0,
            deadline_notified: false,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn naughtiness_index(&self) -> u32 {
        self.naughtiness_index
    }

    pub fn deposited_seconds(&self) -> u64 {
        self.clock.deposited_seconds()
    }

    /// Seconds of focus accumulated so far in this cycle
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        self.clock
            .current_elapsed(now, self.status == SessionStatus::Running)
    }

    /// Arm the one-shot deadline notice; true only the first time per cycle
    pub fn arm_deadline_notice(&mut self) -> bool {
        if self.deadline_notified {
            return false;
        }
        self.deadline_notified = true;
        true
    }

    /// Feed one control event and collect the effects to dispatch.
    ///
    /// Exits from running fold the in-flight span into the deposit exactly
    /// once, before the transition instant is re-marked; entries into
    /// running always supersede any previously scheduled cues on the way
    /// out, so cancel effects precede any new schedule.
    pub fn apply(&mut self, event: SessionEvent, now: DateTime<Utc>) -> Transition {
        match (self.status, event) {
            (SessionStatus::Ready, SessionEvent::Start) => {
                self.clock.mark_transition(now);
                self.status = SessionStatus::Running;
                self.accept(vec![
                    Effect::Notify {
                        message: "Focus session started".to_string(),
                        duration_ms: 1500,
                    },
                    Effect::PlayImmediateCue,
                    Effect::ScheduleCues {
                        deposited_seconds: self.clock.deposited_seconds(),
                    },
                ])
            }
            (SessionStatus::Pause, SessionEvent::Start) => {
                self.clock.mark_transition(now);
                self.status = SessionStatus::Running;
                self.accept(vec![
                    Effect::Notify {
                        message: "Focus session resumed".to_string(),
                        duration_ms: 1500,
                    },
                    Effect::PlayImmediateCue,
                    Effect::ScheduleCues {
                        deposited_seconds: self.clock.deposited_seconds(),
                    },
                ])
            }
            (SessionStatus::Running, SessionEvent::Pause) => {
                self.clock.append_elapsed(now);
                self.clock.mark_transition(now);
                self.status = SessionStatus::Pause;
                self.accept(vec![
                    Effect::Notify {
                        message: "Focus session paused".to_string(),
                        duration_ms: 1500,
                    },
                    Effect::CancelCues,
                ])
            }
            (SessionStatus::Running | SessionStatus::Pause, SessionEvent::Stop) => {
                self.clock.append_elapsed(now);
                let seconds = self.clock.deposited_seconds();
                self.clock.reset();
                self.clock.mark_transition(now);
                self.status = SessionStatus::Ready;
                self.deadline_notified = false;
                self.accept(vec![
                    Effect::RecordHabit { seconds },
                    Effect::Notify {
                        message: "Focus session ended".to_string(),
                        duration_ms: 2000,
                    },
                    Effect::CancelCues,
                ])
            }
            _ => self.reject(),
        }
    }

    fn accept(&mut self, effects: Vec<Effect>) -> Transition {
        self.naughtiness_index = 0;
        Transition {
            accepted: true,
            status: self.status,
            effects,
        }
    }

    fn reject(&mut self) -> Transition {
        self.naughtiness_index += 1;
        let mut effects = Vec::new();
        if (NAUGHTY_NOTICE_FLOOR..=NAUGHTY_NOTICE_CEILING).contains(&self.naughtiness_index) {
            effects.push(Effect::Notify {
                message: "Don't get naughty~".to_string(),
                duration_ms: 3000,
            });
        } else if self.naughtiness_index > NAUGHTY_NOTICE_CEILING {
            effects.push(Effect::Notify {
                message: "KFC Crazy Thursday, wire me 50!".to_string(),
                duration_ms: 5000,
            });
        }
        Transition {
            accepted: false,
            status: self.status,
            effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn start_from_ready_schedules_cues_with_empty_deposit() {
        let mut session = FocusSession::new(at(T0));
        let transition = session.apply(SessionEvent::Start, at(T0));
        assert!(transition.accepted);
        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(
            transition.effects,
            vec![
                Effect::Notify {
                    message: "Focus session started".to_string(),
                    duration_ms: 1500
                },
                Effect::PlayImmediateCue,
                Effect::ScheduleCues { deposited_seconds: 0 },
            ]
        );
    }

    #[test]
    fn pause_banks_the_running_span_and_cancels_cues() {
        let mut session = FocusSession::new(at(T0));
        session.apply(SessionEvent::Start, at(T0));
        let transition = session.apply(SessionEvent::Pause, at(T0 + 5000));
        assert!(transition.accepted);
        assert_eq!(session.status(), SessionStatus::Pause);
        assert_eq!(session.deposited_seconds(), 5);
        assert!(transition.effects.contains(&Effect::CancelCues));
    }

    #[test]
    fn resume_schedules_cues_with_the_banked_deposit() {
        let mut session = FocusSession::new(at(T0));
        session.apply(SessionEvent::Start, at(T0));
        session.apply(SessionEvent::Pause, at(T0 + 5000));
        let transition = session.apply(SessionEvent::Start, at(T0 + 9000));
        assert!(transition.accepted);
        assert!(transition
            .effects
            .contains(&Effect::ScheduleCues { deposited_seconds: 5 }));
    }

    #[test]
    fn full_cycle_reports_only_running_time() {
        let mut session = FocusSession::new(at(T0));
        session.apply(SessionEvent::Start, at(T0));
        session.apply(SessionEvent::Pause, at(T0 + 5000));
        session.apply(SessionEvent::Start, at(T0 + 9000));
        let transition = session.apply(SessionEvent::Stop, at(T0 + 12000));

        // 5s of running plus 3s of running; the 4s pause gap is excluded
        assert_eq!(transition.effects[0], Effect::RecordHabit { seconds: 8 });
        assert!(transition.effects.contains(&Effect::CancelCues));
        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.deposited_seconds(), 0);
    }

    #[test]
    fn stop_from_pause_records_the_deposit() {
        let mut session = FocusSession::new(at(T0));
        session.apply(SessionEvent::Start, at(T0));
        session.apply(SessionEvent::Pause, at(T0 + 6000));
        let transition = session.apply(SessionEvent::Stop, at(T0 + 20_000));
        assert_eq!(transition.effects[0], Effect::RecordHabit { seconds: 6 });
        assert_eq!(session.status(), SessionStatus::Ready);
    }

    #[test]
    fn invalid_press_changes_nothing_but_the_naughtiness_index() {
        let mut session = FocusSession::new(at(T0));
        let transition = session.apply(SessionEvent::Pause, at(T0 + 1000));
        assert!(!transition.accepted);
        assert!(transition.effects.is_empty());
        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.deposited_seconds(), 0);
        assert_eq!(session.naughtiness_index(), 1);
        assert_eq!(session.elapsed_seconds(at(T0 + 60_000)), 0);
    }

    #[test]
    fn repeated_start_while_running_is_rejected() {
        let mut session = FocusSession::new(at(T0));
        session.apply(SessionEvent::Start, at(T0));
        let transition = session.apply(SessionEvent::Start, at(T0 + 1000));
        assert!(!transition.accepted);
        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(session.naughtiness_index(), 1);
    }

    #[test]
    fn valid_press_resets_the_naughtiness_index() {
        let mut session = FocusSession::new(at(T0));
        session.apply(SessionEvent::Pause, at(T0));
        session.apply(SessionEvent::Stop, at(T0));
        assert_eq!(session.naughtiness_index(), 2);
        session.apply(SessionEvent::Start, at(T0 + 1000));
        assert_eq!(session.naughtiness_index(), 0);
    }

    #[test]
    fn persistent_naughtiness_earns_a_notice() {
        let mut session = FocusSession::new(at(T0));
        for _ in 0..6 {
            let transition = session.apply(SessionEvent::Pause, at(T0));
            assert!(transition.effects.is_empty());
        }
        let transition = session.apply(SessionEvent::Pause, at(T0));
        assert_eq!(session.naughtiness_index(), 7);
        assert_eq!(transition.effects.len(), 1);
        assert!(matches!(
            &transition.effects[0],
            Effect::Notify { message, .. } if message.contains("naughty")
        ));
    }

    #[test]
    fn deadline_notice_fires_once_per_cycle() {
        let mut session = FocusSession::new(at(T0));
        session.apply(SessionEvent::Start, at(T0));
        assert!(session.arm_deadline_notice());
        assert!(!session.arm_deadline_notice());

        // stopping the cycle re-arms the latch
        session.apply(SessionEvent::Stop, at(T0 + 1000));
        assert!(session.arm_deadline_notice());
    }

    #[test]
    fn elapsed_seconds_tracks_the_running_span() {
        let mut session = FocusSession::new(at(T0));
        session.apply(SessionEvent::Start, at(T0));
        assert_eq!(session.elapsed_seconds(at(T0 + 12_000)), 12);
        session.apply(SessionEvent::Pause, at(T0 + 12_000));
        assert_eq!(session.elapsed_seconds(at(T0 + 50_000)), 12);
    }
}
