//! Application configuration.
//!
//! Stored as `config.json` in the data directory. Every section is optional;
//! a missing file means the defaults (local SQLite storage, built-in
//! suggestions, 100 ms timer refresh).
//!
//! ```json
//! {
//!   "storage": { "backend": "remote" },
//!   "remote": { "api_url": "https://xyz.supabase.co", "api_key": "..." },
//!   "suggestions": { "api_url": "https://api.groq.com/openai/v1", "model": "llama-3.1-8b-instant" },
//!   "timer": { "poll_interval": 250 }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::api::groq::SuggestionsConfig;
use crate::api::remote::RemoteConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Overrides `suggestions.api_key` when set.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// A section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Local,
    Remote,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: Backend,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimerConfig {
    /// Refresh period of `timer watch`, in milliseconds.
    pub poll_interval: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig { poll_interval: 100 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<SuggestionsConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads a config file, returning the defaults if it does not exist.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str).with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Suggestion settings with the `GROQ_API_KEY` override applied.
    pub fn suggestions(&self) -> SuggestionsConfig {
        self.suggestions_with_key(env::var(GROQ_API_KEY_ENV).ok())
    }

    pub fn suggestions_with_key(&self, env_key: Option<String>) -> SuggestionsConfig {
        let mut suggestions = self.suggestions.clone().unwrap_or_default();
        if let Some(key) = env_key.filter(|key| !key.trim().is_empty()) {
            suggestions.api_key = Some(key);
        }
        suggestions
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        let millis = self.timer.clone().unwrap_or_default().poll_interval.max(10);
        std::time::Duration::from_millis(millis)
    }

    /// Interactive setup, starting from the saved configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let node_descriptions = vec![
            ConfigModule {
                key: "storage".to_string(),
                name: Message::ConfigModuleStorage.to_string(),
            },
            RemoteConfig::module(),
            SuggestionsConfig::module(),
            ConfigModule {
                key: "timer".to_string(),
                name: Message::ConfigModuleTimer.to_string(),
            },
        ];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "storage" => {
                    msg_print!(Message::ConfigModuleStorage);
                    let backends = [Backend::Local, Backend::Remote];
                    let current = backends.iter().position(|b| *b == config.storage.backend).unwrap_or(0);
                    let choice = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptBackend.to_string())
                        .items(&["Local (SQLite)", "Remote (PostgREST)"])
                        .default(current)
                        .interact()?;
                    config.storage.backend = backends[choice];
                }
                "remote" => config.remote = Some(RemoteConfig::init(&config.remote)?),
                "suggestions" => config.suggestions = Some(SuggestionsConfig::init(&config.suggestions)?),
                "timer" => {
                    let default = config.timer.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleTimer);
                    config.timer = Some(TimerConfig {
                        poll_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPollInterval.to_string())
                            .default(default.poll_interval)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
