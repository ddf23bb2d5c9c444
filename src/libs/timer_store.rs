//! Persists the timer between command invocations.
//!
//! Each `habitual timer ...` call is a separate process, so the state the
//! engine works on is loaded from `timer.json` before the command and written
//! back after it.

use crate::libs::data_storage::DataStorage;
use crate::libs::timer::TimerState;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const TIMER_FILE_NAME: &str = "timer.json";

pub struct TimerFile {
    path: PathBuf,
}

impl TimerFile {
    /// The snapshot in the data directory.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: DataStorage::new().get_path(TIMER_FILE_NAME)?,
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the saved state, or an idle timer if nothing was saved yet.
    pub fn load(&self) -> Result<TimerState> {
        if !self.path.exists() {
            return Ok(TimerState::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).with_context(|| format!("Timer snapshot {} is unreadable", self.path.display()))
    }

    /// Writes the state. An idle timer removes the file instead.
    pub fn save(&self, state: &TimerState) -> Result<()> {
        if state.is_idle() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(state)?)?;
        Ok(())
    }
}
