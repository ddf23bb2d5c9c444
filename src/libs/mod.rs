//! Core library modules for habitual.
//!
//! - **Domain**: habits, sessions, goal parsing, profile statistics
//! - **Timer**: the tracking engine, its clock and its on-disk snapshot
//! - **Persistence**: the repository interface both backends implement
//! - **Infrastructure**: configuration, data storage, messages, logging
//! - **Presentation**: tables and duration formatting
//!
//! ```rust,no_run
//! use habitual::db::store::LocalStore;
//! use habitual::libs::clock::SystemClock;
//! use habitual::libs::habit::HabitDraft;
//! use habitual::libs::repository::HabitRepository;
//! use habitual::libs::timer::Timer;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = LocalStore::new()?;
//! let habit = store.create(&HabitDraft::new("Reading", 8, "1 hour/day")).await?;
//!
//! let mut timer = Timer::new(SystemClock);
//! timer.start(&habit.id);
//! timer.pause();
//! timer.stop(&store).await?;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod data_storage;
pub mod formatter;
pub mod goal;
pub mod habit;
pub mod logging;
pub mod messages;
pub mod profile;
pub mod repository;
pub mod session;
pub mod suggestions;
pub mod timer;
pub mod timer_store;
pub mod view;
