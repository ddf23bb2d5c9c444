/// Every user-facing message habitual prints.
///
/// Text lives in the `Display` implementation in `display.rs`; call sites only
/// pick a variant and supply its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === HABIT MESSAGES ===
    HabitCreated(String),
    HabitUpdated(String),
    HabitDeleted(String),
    HabitNotFound(String),    // reference
    HabitAmbiguous(String),   // reference
    HabitsNotFound,
    HabitsHeader,
    HabitDetailsHeader(String),
    ConfirmDeleteHabit(String),
    HabitDeleteCancelled,
    TimeSpentOutOfRange(i64), // minutes
    NoChangesDetected,
    SamplesSeeded(usize),
    SamplesSkipped,

    // === TIMER MESSAGES ===
    TimerArmed(String),
    TimerStarted(String),
    TimerAlreadyRunning(String),
    TimerBusy(String),
    TimerPaused(String, String), // habit, elapsed
    TimerNotRunning,
    TimerNoHabitSelected,
    TimerStopped(String, String), // habit, duration
    TimerNothingToRecord,
    TimerSessionKept(String), // elapsed
    TimerHabitTotalNotUpdated(String),
    TimerStatusIdle,
    TimerWatchHint,

    // === SESSION MESSAGES ===
    SessionsHeader(String),
    SessionsNotFound(String),

    // === PROFILE MESSAGES ===
    ProfileHeader,
    ProfileChartHeader,
    ProfileBreakdownHeader,
    ProfileEmpty,

    // === SUGGESTION MESSAGES ===
    SuggestionsHeader,
    SuggestionsOffline,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleStorage,
    ConfigModuleRemote,
    ConfigModuleSuggestions,
    ConfigModuleTimer,
    RemoteConfigMissing,

    // === PROMPTS ===
    PromptSelectModules,
    PromptBackend,
    PromptRemoteApiUrl,
    PromptRemoteApiKey,
    PromptRemoteAccessToken,
    PromptRemoteUserId,
    PromptSuggestionsApiUrl,
    PromptSuggestionsApiKey,
    PromptSuggestionsModel,
    PromptPollInterval,
    PromptHabitName,
    PromptHabitImportance,
    PromptHabitGoal,
    PromptHabitDescription,
    PromptHabitResources,
    PromptHabitColor,
    PromptSelectHabit,
    ImportanceRange,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
}
