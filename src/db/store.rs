//! The SQLite backend of [`HabitRepository`].

use crate::db::db::Db;
use crate::db::habits::Habits;
use crate::db::sessions::Sessions;
use crate::libs::habit::{Habit, HabitDraft, HabitUpdate};
use crate::libs::repository::{HabitRepository, Result, StoreError};
use crate::libs::session::{NewSession, Session};
use chrono::Utc;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Habits and sessions sharing one connection.
pub struct LocalStore {
    habits: Habits,
    sessions: Sessions,
}

impl LocalStore {
    /// The database in the data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_db(Db::open(path)?))
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_db(Db::in_memory()?))
    }

    fn from_db(db: Db) -> Self {
        let conn = Arc::new(Mutex::new(db.conn));
        Self {
            habits: Habits::new(conn.clone()),
            sessions: Sessions::new(conn),
        }
    }

    pub fn session_count(&self) -> Result<usize> {
        Ok(self.sessions.count()?)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl HabitRepository for LocalStore {
    async fn create(&self, draft: &HabitDraft) -> Result<Habit> {
        let habit = Habit::from_draft(new_id(), draft, Utc::now());
        self.habits.insert(&habit)?;
        debug!(habit = %habit.id, name = %habit.name, "habit created");
        Ok(habit)
    }

    async fn update(&self, id: &str, update: &HabitUpdate) -> Result<Habit> {
        let mut habit = self.habits.fetch(id)?.ok_or_else(|| StoreError::NotFound(format!("habit {}", id)))?;
        habit.apply(update, Utc::now());
        self.habits.update(&habit)?;
        Ok(habit)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.habits.delete(id)? {
            0 => Err(StoreError::NotFound(format!("habit {}", id))),
            _ => Ok(()),
        }
    }

    async fn list(&self) -> Result<Vec<Habit>> {
        Ok(self.habits.fetch_all()?)
    }

    async fn get(&self, id: &str) -> Result<Option<Habit>> {
        Ok(self.habits.fetch(id)?)
    }

    async fn create_session(&self, session: &NewSession) -> Result<Session> {
        let session = session.clone().into_session(new_id());
        self.sessions.insert(&session)?;
        Ok(session)
    }

    async fn list_sessions(&self, habit_id: &str) -> Result<Vec<Session>> {
        Ok(self.sessions.fetch_for_habit(habit_id)?)
    }
}
