//! The persistence interface the timer and the commands talk to.
//!
//! Two backends implement [`HabitRepository`]:
//!
//! - [`LocalStore`]: a SQLite file in the data directory
//! - [`RemoteStore`]: a PostgREST table API (for example a Supabase project)
//!
//! [`Store`] wraps whichever one the configuration selects, so business logic
//! is written once against the trait.

use crate::api::remote::RemoteStore;
use crate::db::store::LocalStore;
use crate::libs::config::{Backend, Config};
use crate::libs::habit::{Habit, HabitDraft, HabitUpdate};
use crate::libs::messages::Message;
use crate::libs::session::{NewSession, Session};
use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("Connection failed: {0}")]
    Connectivity(String),

    /// The backend refused the credentials.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The backend answered with an unexpected status.
    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration does not describe a usable store.
    #[error("{0}")]
    Config(String),
}

/// CRUD operations on habits and their sessions.
#[allow(async_fn_in_trait)]
pub trait HabitRepository {
    /// Stores a new habit and returns it with its assigned ID and timestamps.
    async fn create(&self, draft: &HabitDraft) -> Result<Habit>;

    /// Applies a partial update and returns the updated habit.
    async fn update(&self, id: &str, update: &HabitUpdate) -> Result<Habit>;

    /// Deletes a habit together with its sessions.
    async fn delete(&self, id: &str) -> Result<()>;

    /// All habits, newest first.
    async fn list(&self) -> Result<Vec<Habit>>;

    async fn get(&self, id: &str) -> Result<Option<Habit>> {
        Ok(self.list().await?.into_iter().find(|habit| habit.id == id))
    }

    async fn create_session(&self, session: &NewSession) -> Result<Session>;

    /// Sessions of one habit, most recent first.
    async fn list_sessions(&self, habit_id: &str) -> Result<Vec<Session>>;
}

/// The configured backend.
pub enum Store {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl Store {
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.storage.backend {
            Backend::Local => Ok(Store::Local(LocalStore::new()?)),
            Backend::Remote => {
                let remote = config.remote.as_ref().ok_or_else(|| StoreError::Config(Message::RemoteConfigMissing.to_string()))?;
                Ok(Store::Remote(RemoteStore::new(remote)))
            }
        }
    }
}

impl HabitRepository for Store {
    async fn create(&self, draft: &HabitDraft) -> Result<Habit> {
        match self {
            Store::Local(store) => store.create(draft).await,
            Store::Remote(store) => store.create(draft).await,
        }
    }

    async fn update(&self, id: &str, update: &HabitUpdate) -> Result<Habit> {
        match self {
            Store::Local(store) => store.update(id, update).await,
            Store::Remote(store) => store.update(id, update).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self {
            Store::Local(store) => store.delete(id).await,
            Store::Remote(store) => store.delete(id).await,
        }
    }

    async fn list(&self) -> Result<Vec<Habit>> {
        match self {
            Store::Local(store) => store.list().await,
            Store::Remote(store) => store.list().await,
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Habit>> {
        match self {
            Store::Local(store) => store.get(id).await,
            Store::Remote(store) => store.get(id).await,
        }
    }

    async fn create_session(&self, session: &NewSession) -> Result<Session> {
        match self {
            Store::Local(store) => store.create_session(session).await,
            Store::Remote(store) => store.create_session(session).await,
        }
    }

    async fn list_sessions(&self, habit_id: &str) -> Result<Vec<Session>> {
        match self {
            Store::Local(store) => store.list_sessions(habit_id).await,
            Store::Remote(store) => store.list_sessions(habit_id).await,
        }
    }
}
