//! Timer engine.
//!
//! One global timer tracks time for one habit at a time. The engine is a
//! wall-clock state machine: it keeps no thread and never sleeps. Elapsed time
//! is derived from the start instant whenever it is asked for, so callers may
//! poll [`Timer::tick`] at any rate without drift.
//!
//! ```text
//! Idle --select_and_arm--> Armed --start--> Running --pause--> Paused
//!                           ^                  |  ^               |
//!                           |                  |  +----start------+
//!                           +------ stop ------+------ stop ------+--> Idle
//! ```
//!
//! `stop` turns the accumulated time into a [`Session`] through the
//! repository and adds it to the habit's total.

use crate::libs::clock::Clock;
use crate::libs::goal;
use crate::libs::habit::{Habit, HabitUpdate};
use crate::libs::repository::{HabitRepository, StoreError};
use crate::libs::session::{NewSession, Session};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Transient timer state.
///
/// The start instant is present exactly when the timer is running; there is
/// no separate running flag that could disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimerSnapshot", into = "TimerSnapshot")]
pub struct TimerState {
    selected_habit_id: Option<String>,
    elapsed: Duration,
    started_at: Option<DateTime<Utc>>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            selected_habit_id: None,
            elapsed: Duration::zero(),
            started_at: None,
        }
    }
}

impl TimerState {
    /// Not running, `elapsed` already accumulated for `habit_id`.
    pub fn paused(habit_id: &str, elapsed: Duration) -> Self {
        Self {
            selected_habit_id: Some(habit_id.to_string()),
            elapsed: elapsed.max(Duration::zero()),
            started_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Time accumulated before the current running interval.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn selected_habit_id(&self) -> Option<&str> {
        self.selected_habit_id.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Displayed elapsed time at `now`. Never negative, never mutates.
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        match self.started_at {
            Some(started_at) => self.elapsed + (now - started_at).max(Duration::zero()),
            None => self.elapsed,
        }
    }
}

/// On-disk shape of [`TimerState`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimerSnapshot {
    is_running: bool,
    start_time: Option<DateTime<Utc>>,
    elapsed_ms: i64,
    selected_habit_id: Option<String>,
}

#[derive(Debug, Error)]
#[error("invalid timer snapshot: {0}")]
pub struct InvalidTimerState(&'static str);

impl TryFrom<TimerSnapshot> for TimerState {
    type Error = InvalidTimerState;

    fn try_from(snapshot: TimerSnapshot) -> Result<Self, Self::Error> {
        if snapshot.is_running != snapshot.start_time.is_some() {
            return Err(InvalidTimerState("running flag and start time disagree"));
        }
        if snapshot.elapsed_ms < 0 {
            return Err(InvalidTimerState("negative elapsed time"));
        }
        if snapshot.selected_habit_id.is_none() && (snapshot.is_running || snapshot.elapsed_ms > 0) {
            return Err(InvalidTimerState("time tracked without a selected habit"));
        }
        Ok(Self {
            selected_habit_id: snapshot.selected_habit_id,
            elapsed: Duration::milliseconds(snapshot.elapsed_ms),
            started_at: snapshot.start_time,
        })
    }
}

impl From<TimerState> for TimerSnapshot {
    fn from(state: TimerState) -> Self {
        Self {
            is_running: state.is_running(),
            start_time: state.started_at,
            elapsed_ms: state.elapsed.num_milliseconds(),
            selected_habit_id: state.selected_habit_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArmOutcome {
    Armed,
    /// The timer is running; selection is locked until it is paused or stopped.
    Busy { habit_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    /// Another habit owns the timer, either running or paused with unsaved time.
    Busy { habit_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StopOutcome {
    /// A session was stored. `habit` is the habit with its new total, or
    /// `None` if the habit no longer exists.
    Recorded { session: Session, habit: Option<Habit> },
    /// No time was tracked; the timer was only reset.
    Empty,
}

#[derive(Debug, Error)]
pub enum TimerError {
    /// Nothing was stored. The timer is paused on the habit with the full
    /// duration, so stopping again retries.
    #[error("Session for habit '{habit_id}' was not saved ({elapsed_ms} ms kept on the timer): {source}")]
    SessionNotSaved {
        habit_id: String,
        elapsed_ms: i64,
        #[source]
        source: StoreError,
    },

    /// The session is stored but the habit total is stale. The timer was
    /// reset, since retrying would store the session twice.
    #[error("Session {} saved, but the total of habit '{}' was not updated: {source}", .session.id, .session.habit_id)]
    HabitNotUpdated {
        session: Session,
        #[source]
        source: StoreError,
    },
}

/// The timer engine: a [`TimerState`] plus the clock it reads time from.
#[derive(Debug)]
pub struct Timer<C: Clock> {
    state: TimerState,
    clock: C,
}

impl<C: Clock> Timer<C> {
    pub fn new(clock: C) -> Self {
        Self::with_state(TimerState::default(), clock)
    }

    /// Resumes from a previously saved state.
    pub fn with_state(state: TimerState, clock: C) -> Self {
        Self { state, clock }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Read-only copy of the current state.
    pub fn snapshot(&self) -> TimerState {
        self.state.clone()
    }

    pub fn into_state(self) -> TimerState {
        self.state
    }

    /// Selects `habit_id` with a fresh, stopped timer.
    pub fn select_and_arm(&mut self, habit_id: &str) -> ArmOutcome {
        if self.state.is_running() {
            return ArmOutcome::Busy {
                habit_id: self.state.selected_habit_id.clone().unwrap_or_default(),
            };
        }
        if self.state.elapsed > Duration::zero() {
            debug!(habit = ?self.state.selected_habit_id, elapsed_ms = self.state.elapsed.num_milliseconds(), "discarding unsaved time");
        }
        self.state = TimerState::paused(habit_id, Duration::zero());
        debug!(habit = habit_id, "timer armed");
        ArmOutcome::Armed
    }

    /// Starts or resumes the timer for `habit_id`.
    ///
    /// Elapsed time carries over from earlier intervals. Never fails: an
    /// occupied timer is reported through the outcome and left as it is.
    pub fn start(&mut self, habit_id: &str) -> StartOutcome {
        if let Some(current) = self.state.selected_habit_id.as_deref() {
            let owns_time = self.state.is_running() || self.state.elapsed > Duration::zero();
            if current != habit_id && owns_time {
                return StartOutcome::Busy { habit_id: current.to_string() };
            }
            if current == habit_id && self.state.is_running() {
                return StartOutcome::AlreadyRunning;
            }
        }

        let now = self.clock.now();
        self.state.selected_habit_id = Some(habit_id.to_string());
        self.state.started_at = Some(now);
        debug!(habit = habit_id, elapsed_ms = self.state.elapsed.num_milliseconds(), "timer started");
        StartOutcome::Started
    }

    /// Folds the running interval into the elapsed time. Returns the new
    /// elapsed total, or `None` if the timer was not running.
    pub fn pause(&mut self) -> Option<Duration> {
        self.state.started_at?;

        let now = self.clock.now();
        self.state.elapsed = self.state.elapsed_at(now);
        self.state.started_at = None;
        debug!(elapsed_ms = self.state.elapsed.num_milliseconds(), "timer paused");
        Some(self.state.elapsed)
    }

    /// Ends the tracking episode.
    ///
    /// A nonzero total is stored as one session ending now and added to the
    /// habit's time spent. The timer is reset afterwards, except when the
    /// session itself could not be stored (see [`TimerError::SessionNotSaved`]).
    pub async fn stop<R: HabitRepository>(&mut self, repo: &R) -> Result<StopOutcome, TimerError> {
        let now = self.clock.now();
        let total = self.state.elapsed_at(now);
        let habit_id = match self.state.selected_habit_id.clone() {
            Some(habit_id) if total > Duration::zero() => habit_id,
            _ => {
                self.state = TimerState::default();
                return Ok(StopOutcome::Empty);
            }
        };

        let session = match repo.create_session(&NewSession::ended(&habit_id, now, total)).await {
            Ok(session) => session,
            Err(source) => {
                warn!(habit = %habit_id, error = %source, "session not saved, keeping time on the timer");
                self.state = TimerState::paused(&habit_id, total);
                return Err(TimerError::SessionNotSaved {
                    habit_id,
                    elapsed_ms: total.num_milliseconds(),
                    source,
                });
            }
        };
        self.state = TimerState::default();
        debug!(habit = %habit_id, session = %session.id, duration_ms = total.num_milliseconds(), "session recorded");

        let habit = match repo.get(&habit_id).await {
            Ok(Some(habit)) => habit,
            Ok(None) => {
                warn!(habit = %habit_id, "habit vanished before its total could be updated");
                return Ok(StopOutcome::Recorded { session, habit: None });
            }
            Err(source) => return Err(TimerError::HabitNotUpdated { session, source }),
        };

        match repo.update(&habit_id, &HabitUpdate::time_spent(habit.time_spent + total)).await {
            Ok(habit) => Ok(StopOutcome::Recorded { session, habit: Some(habit) }),
            Err(source) => Err(TimerError::HabitNotUpdated { session, source }),
        }
    }

    /// Elapsed time to display right now. Pure read.
    pub fn tick(&self) -> Duration {
        self.state.elapsed_at(self.clock.now())
    }

    /// Progress of `habit` including time on the timer that is not saved yet.
    pub fn live_progress(&self, habit: &Habit) -> f64 {
        let pending = match self.state.selected_habit_id() {
            Some(id) if id == habit.id => self.tick(),
            _ => Duration::zero(),
        };
        goal::progress_percentage(habit.time_spent + pending, &habit.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::clock::ManualClock;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let clock = ManualClock::new(t0());
        let mut timer = Timer::new(&clock);
        timer.start("reading");
        clock.advance(Duration::seconds(3));
        timer.pause();
        timer.start("reading");

        let json = serde_json::to_string(timer.state()).unwrap();
        let restored: TimerState = serde_json::from_str(&json).unwrap();

        assert_eq!(&restored, timer.state());
        assert!(json.contains("\"isRunning\":true"));
        assert!(json.contains("\"elapsedMs\":3000"));
    }

    #[test]
    fn inconsistent_snapshots_are_rejected() {
        let running_without_start = r#"{"isRunning":true,"startTime":null,"elapsedMs":0,"selectedHabitId":"h"}"#;
        let start_without_running = r#"{"isRunning":false,"startTime":"2025-03-01T09:00:00Z","elapsedMs":0,"selectedHabitId":"h"}"#;
        let orphan_time = r#"{"isRunning":false,"startTime":null,"elapsedMs":500,"selectedHabitId":null}"#;

        assert!(serde_json::from_str::<TimerState>(running_without_start).is_err());
        assert!(serde_json::from_str::<TimerState>(start_without_running).is_err());
        assert!(serde_json::from_str::<TimerState>(orphan_time).is_err());
    }

    #[test]
    fn clock_going_backwards_never_yields_negative_time() {
        let clock = ManualClock::new(t0());
        let mut timer = Timer::new(&clock);
        timer.start("reading");
        clock.set(t0() - Duration::seconds(10));

        assert_eq!(timer.tick(), Duration::zero());
        assert_eq!(timer.pause(), Some(Duration::zero()));
    }

    #[test]
    fn arming_is_refused_while_running() {
        let clock = ManualClock::new(t0());
        let mut timer = Timer::new(&clock);
        timer.start("reading");

        assert_eq!(timer.select_and_arm("exercise"), ArmOutcome::Busy { habit_id: "reading".to_string() });
        assert_eq!(timer.state().selected_habit_id(), Some("reading"));
        assert!(timer.state().is_running());
    }
}
