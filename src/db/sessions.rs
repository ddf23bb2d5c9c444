//! SQLite rows for habit sessions.

use crate::libs::session::Session;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use std::sync::Arc;

const INSERT_SESSION: &str = "INSERT INTO habit_sessions (id, habit_id, start_time, end_time, duration, is_active)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_HABIT_SESSIONS: &str = "SELECT id, habit_id, start_time, end_time, duration, is_active
    FROM habit_sessions WHERE habit_id = ?1 ORDER BY start_time DESC, rowid DESC";

const COUNT_SESSIONS: &str = "SELECT COUNT(*) FROM habit_sessions";

pub struct Sessions {
    pub conn: Arc<Mutex<Connection>>,
}

impl Sessions {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn insert(&self, session: &Session) -> rusqlite::Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            INSERT_SESSION,
            params![
                session.id,
                session.habit_id,
                session.start,
                session.end,
                session.duration.num_milliseconds(),
                session.active,
            ],
        )?;
        Ok(())
    }

    /// Sessions of `habit_id`, most recent first.
    pub fn fetch_for_habit(&self, habit_id: &str) -> rusqlite::Result<Vec<Session>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_HABIT_SESSIONS)?;
        let sessions = stmt.query_map(params![habit_id], session_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(sessions)
    }

    pub fn count(&self) -> rusqlite::Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row(COUNT_SESSIONS, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn session_from_row(row: &Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        start: row.get::<_, DateTime<Utc>>(2)?,
        end: row.get::<_, Option<DateTime<Utc>>>(3)?,
        duration: Duration::milliseconds(row.get(4)?),
        active: row.get(5)?,
    })
}
