//! Completed blocks of tracked time.

use chrono::{DateTime, Duration, Utc};

/// A stored session. Sessions are written once and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub habit_id: String,
    pub start: DateTime<Utc>,
    /// `None` only while a session is active.
    pub end: Option<DateTime<Utc>>,
    pub duration: Duration,
    pub active: bool,
}

/// A session about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub habit_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: Duration,
}

impl NewSession {
    /// A finished session of `duration` that ended at `end`.
    ///
    /// The start is derived from the end so `end - start == duration` holds
    /// even when the time was collected across several pauses.
    pub fn ended(habit_id: &str, end: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            habit_id: habit_id.to_string(),
            start: end - duration,
            end,
            duration,
        }
    }

    pub fn into_session(self, id: impl Into<String>) -> Session {
        Session {
            id: id.into(),
            habit_id: self.habit_id,
            start: self.start,
            end: Some(self.end),
            duration: self.duration,
            active: false,
        }
    }
}
