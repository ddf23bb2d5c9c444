//! Local persistence on SQLite.
//!
//! ```rust,no_run
//! use habitual::db::store::LocalStore;
//! use habitual::libs::habit::HabitDraft;
//! use habitual::libs::repository::HabitRepository;
//!
//! # async fn demo() -> habitual::libs::repository::Result<()> {
//! let store = LocalStore::new()?;
//! let habit = store.create(&HabitDraft::new("Reading", 8, "1 hour/day")).await?;
//! let sessions = store.list_sessions(&habit.id).await?;
//! # Ok(())
//! # }
//! ```

/// Connection setup; opening a database applies pending migrations.
pub mod db;

/// Versioned schema changes tracked in the `migrations` table.
pub mod migrations;

pub mod habits;

pub mod sessions;

/// [`crate::libs::repository::HabitRepository`] over the tables above.
pub mod store;
