//! Display implementation for habitual messages.
//!
//! All message text is defined here, in one match, so wording stays
//! consistent across commands.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === HABIT MESSAGES ===
            Message::HabitCreated(name) => format!("Habit '{}' created", name),
            Message::HabitUpdated(name) => format!("Habit '{}' updated", name),
            Message::HabitDeleted(name) => format!("Habit '{}' and its sessions deleted", name),
            Message::HabitNotFound(reference) => format!("No habit matches '{}'", reference),
            Message::HabitAmbiguous(reference) => format!("More than one habit is named '{}'; use its ID instead", reference),
            Message::HabitsNotFound => "No habits yet. Add one with `habitual habit add <NAME>`.".to_string(),
            Message::HabitsHeader => "Habits:".to_string(),
            Message::HabitDetailsHeader(name) => format!("Habit: {}", name),
            Message::ConfirmDeleteHabit(name) => format!("Delete habit '{}' and all of its sessions?", name),
            Message::HabitDeleteCancelled => "Nothing deleted.".to_string(),
            Message::TimeSpentOutOfRange(minutes) => format!("{} minutes is not a valid time spent", minutes),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::SamplesSeeded(count) => format!("Added {} sample habit(s).", count),
            Message::SamplesSkipped => "The store already has habits; sample habits were not added.".to_string(),

            // === TIMER MESSAGES ===
            Message::TimerArmed(name) => format!("Timer ready for '{}'. Run `habitual timer start` when you begin.", name),
            Message::TimerStarted(name) => format!("Tracking '{}'", name),
            Message::TimerAlreadyRunning(name) => format!("The timer is already running for '{}'", name),
            Message::TimerBusy(name) => format!("The timer is busy with '{}'. Stop it first.", name),
            Message::TimerPaused(name, elapsed) => format!("Paused '{}' at {}", name, elapsed),
            Message::TimerNotRunning => "The timer is not running.".to_string(),
            Message::TimerNoHabitSelected => "No habit selected. Pass a habit or run `habitual timer select <HABIT>`.".to_string(),
            Message::TimerStopped(name, duration) => format!("Recorded {} for '{}'", duration, name),
            Message::TimerNothingToRecord => "Timer reset; nothing to record.".to_string(),
            Message::TimerSessionKept(elapsed) => format!("The session could not be saved. {} is kept on the paused timer; run `habitual timer stop` again to retry.", elapsed),
            Message::TimerHabitTotalNotUpdated(name) => format!("The session was saved but the total for '{}' was not updated.", name),
            Message::TimerStatusIdle => "The timer is idle.".to_string(),
            Message::TimerWatchHint => "Press Ctrl+C to stop watching.".to_string(),

            // === SESSION MESSAGES ===
            Message::SessionsHeader(name) => format!("Sessions for {}:", name),
            Message::SessionsNotFound(name) => format!("No sessions recorded for '{}' yet.", name),

            // === PROFILE MESSAGES ===
            Message::ProfileHeader => "Profile".to_string(),
            Message::ProfileChartHeader => "Habit performance (progress % x importance / 10)".to_string(),
            Message::ProfileBreakdownHeader => "Detailed breakdown".to_string(),
            Message::ProfileEmpty => "Add some habits to see your profile.".to_string(),

            // === SUGGESTION MESSAGES ===
            Message::SuggestionsHeader => "Suggestions:".to_string(),
            Message::SuggestionsOffline => "No suggestion API key configured; showing built-in suggestions.".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved.".to_string(),
            Message::ConfigModuleStorage => "Storage".to_string(),
            Message::ConfigModuleRemote => "Remote store".to_string(),
            Message::ConfigModuleSuggestions => "Suggestions".to_string(),
            Message::ConfigModuleTimer => "Timer".to_string(),
            Message::RemoteConfigMissing => "The remote backend is selected but not configured. Run `habitual init` and fill in the remote store.".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure (space to select, enter to confirm)".to_string(),
            Message::PromptBackend => "Where should habits be stored?".to_string(),
            Message::PromptRemoteApiUrl => "Remote project URL".to_string(),
            Message::PromptRemoteApiKey => "Remote API key".to_string(),
            Message::PromptRemoteAccessToken => "Access token (empty to use the API key)".to_string(),
            Message::PromptRemoteUserId => "User ID (empty if the backend assigns it)".to_string(),
            Message::PromptSuggestionsApiUrl => "Suggestion API URL".to_string(),
            Message::PromptSuggestionsApiKey => "Suggestion API key (empty to use built-in suggestions)".to_string(),
            Message::PromptSuggestionsModel => "Suggestion model".to_string(),
            Message::PromptPollInterval => "Timer refresh interval in milliseconds".to_string(),
            Message::PromptHabitName => "Habit name".to_string(),
            Message::PromptHabitImportance => "Importance (1-10)".to_string(),
            Message::PromptHabitGoal => "Goal (e.g. 1 hour/day)".to_string(),
            Message::PromptHabitDescription => "Description".to_string(),
            Message::PromptHabitResources => "Resources, comma separated".to_string(),
            Message::PromptHabitColor => "Colour (hex)".to_string(),
            Message::PromptSelectHabit => "Select a habit".to_string(),
            Message::ImportanceRange => "Importance must be between 1 and 10".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
        };
        write!(f, "{}", text)
    }
}
