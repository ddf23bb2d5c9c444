//! Habit records and the partial updates applied to them.

use crate::libs::goal;
use chrono::{DateTime, Duration, Utc};

pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 10;
pub const DEFAULT_IMPORTANCE: u8 = 5;
pub const DEFAULT_COLOR: &str = "#2563eb";
pub const DEFAULT_GOAL: &str = "1 hour/day";

/// Clamps any integer into the 1..=10 importance scale.
pub fn clamp_importance(value: i64) -> u8 {
    value.clamp(MIN_IMPORTANCE as i64, MAX_IMPORTANCE as i64) as u8
}

/// A tracked habit.
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    pub id: String,
    pub name: String,
    /// 1 (lowest) to 10 (highest).
    pub importance: u8,
    /// URLs or free-text descriptions of helpful resources.
    pub resources: Vec<String>,
    pub description: String,
    /// Free text target, e.g. "1 hour/day".
    pub goal: String,
    /// Total tracked time; only grows, except through an explicit edit.
    pub time_spent: Duration,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Habit {
    /// Builds a new habit from a draft. Time spent starts at zero.
    pub fn from_draft(id: impl Into<String>, draft: &HabitDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: draft.name.clone(),
            importance: clamp_importance(draft.importance as i64),
            resources: draft.resources.clone(),
            description: draft.description.clone(),
            goal: draft.goal.clone(),
            time_spent: Duration::zero(),
            color: draft.color.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the present fields of `update` and refreshes `updated_at`.
    pub fn apply(&mut self, update: &HabitUpdate, now: DateTime<Utc>) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(importance) = update.importance {
            self.importance = clamp_importance(importance as i64);
        }
        if let Some(resources) = &update.resources {
            self.resources = resources.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(goal) = &update.goal {
            self.goal = goal.clone();
        }
        if let Some(time_spent) = update.time_spent {
            self.time_spent = time_spent.max(Duration::zero());
        }
        if let Some(color) = &update.color {
            self.color = Some(color.clone());
        }
        self.updated_at = now;
    }

    /// Progress towards the goal in percent, capped at 100.
    pub fn progress(&self) -> f64 {
        goal::progress_percentage(self.time_spent, &self.goal)
    }

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }
}

/// User-supplied fields of a habit that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitDraft {
    pub name: String,
    pub importance: u8,
    pub resources: Vec<String>,
    pub description: String,
    pub goal: String,
    pub color: Option<String>,
}

impl HabitDraft {
    pub fn new(name: &str, importance: i64, goal: &str) -> Self {
        Self {
            name: name.to_string(),
            importance: clamp_importance(importance),
            resources: Vec::new(),
            description: String::new(),
            goal: goal.to_string(),
            color: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_resources(mut self, resources: Vec<String>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }
}

/// A partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub importance: Option<u8>,
    pub resources: Option<Vec<String>>,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub time_spent: Option<Duration>,
    pub color: Option<String>,
}

impl HabitUpdate {
    pub fn time_spent(time_spent: Duration) -> Self {
        Self {
            time_spent: Some(time_spent),
            ..Self::default()
        }
    }

    pub fn importance(mut self, importance: i64) -> Self {
        self.importance = Some(clamp_importance(importance));
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

const MIN_ID_PREFIX: usize = 4;

/// Orders habits by importance, highest first. Equal importance keeps the
/// existing order.
pub fn sort_by_importance(habits: &mut [Habit]) {
    habits.sort_by(|a, b| b.importance.cmp(&a.importance));
}

/// Resolves a habit by exact ID, then by case-insensitive name, then by a
/// unique ID prefix of at least four characters.
///
/// Returns `Ok(None)` when nothing matches and `Err(count)` when the name is
/// shared by several habits.
pub fn find<'a>(habits: &'a [Habit], reference: &str) -> Result<Option<&'a Habit>, usize> {
    if let Some(habit) = habits.iter().find(|h| h.id == reference) {
        return Ok(Some(habit));
    }

    let matches: Vec<&Habit> = habits.iter().filter(|h| h.name.eq_ignore_ascii_case(reference.trim())).collect();
    match matches.len() {
        0 => {}
        1 => return Ok(Some(matches[0])),
        n => return Err(n),
    }

    // The shortened IDs shown in listings.
    if reference.len() < MIN_ID_PREFIX {
        return Ok(None);
    }
    let matches: Vec<&Habit> = habits.iter().filter(|h| h.id.starts_with(reference)).collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0])),
        n => Err(n),
    }
}

/// A sample habit together with the time already spent on it.
pub struct Sample {
    pub draft: HabitDraft,
    pub time_spent: Duration,
}

/// Demo habits offered by `habitual init --samples`.
pub fn samples() -> Vec<Sample> {
    vec![
        Sample {
            draft: HabitDraft::new("Reading", 8, "1 hour/day")
                .with_description("Daily reading to expand knowledge and vocabulary")
                .with_resources(vec!["https://goodreads.com".to_string(), "Local library".to_string()])
                .with_color(Some("#2563eb".to_string())),
            time_spent: Duration::minutes(60),
        },
        Sample {
            draft: HabitDraft::new("Exercise", 9, "45 mins/day")
                .with_description("Regular physical activity for health and wellness")
                .with_resources(vec!["Gym membership".to_string(), "YouTube fitness channels".to_string()])
                .with_color(Some("#dc2626".to_string())),
            time_spent: Duration::minutes(45),
        },
        Sample {
            draft: HabitDraft::new("Meditation", 7, "20 mins/day")
                .with_description("Mindfulness practice for mental clarity")
                .with_resources(vec!["Headspace app".to_string(), "Calm app".to_string()])
                .with_color(Some("#059669".to_string())),
            time_spent: Duration::minutes(20),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(id: &str, name: &str) -> Habit {
        Habit::from_draft(id, &HabitDraft::new(name, 5, DEFAULT_GOAL), Utc::now())
    }

    #[test]
    fn importance_is_clamped() {
        assert_eq!(clamp_importance(0), 1);
        assert_eq!(clamp_importance(-4), 1);
        assert_eq!(clamp_importance(7), 7);
        assert_eq!(clamp_importance(42), 10);
        assert_eq!(HabitDraft::new("Run", 15, "1 hour").importance, 10);
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut reading = habit("1", "Reading");
        let before = reading.clone();
        let later = before.updated_at + Duration::seconds(5);

        reading.apply(&HabitUpdate { goal: Some("2 hours/day".to_string()), ..HabitUpdate::default() }, later);

        assert_eq!(reading.goal, "2 hours/day");
        assert_eq!(reading.name, before.name);
        assert_eq!(reading.time_spent, before.time_spent);
        assert_eq!(reading.updated_at, later);
        assert_eq!(reading.created_at, before.created_at);
    }

    #[test]
    fn find_prefers_id_then_name() {
        let habits = vec![habit("a1", "Reading"), habit("b2", "Exercise"), habit("c3", "exercise")];

        assert_eq!(find(&habits, "a1").map(|h| h.map(|h| h.name.as_str())), Ok(Some("Reading")));
        assert_eq!(find(&habits, "reading").map(|h| h.map(|h| h.id.as_str())), Ok(Some("a1")));
        assert_eq!(find(&habits, "Exercise").map(|h| h.map(|h| h.id.clone())), Err(2));
        assert_eq!(find(&habits, "Juggling"), Ok(None));
    }

    #[test]
    fn find_accepts_unique_id_prefixes() {
        let habits = vec![habit("4f1c2d9e-aaaa", "Reading"), habit("4f1c77aa-bbbb", "Exercise")];

        assert_eq!(find(&habits, "4f1c2d").map(|h| h.map(|h| h.name.as_str())), Ok(Some("Reading")));
        assert_eq!(find(&habits, "4f1c").map(|h| h.map(|h| h.id.clone())), Err(2));
        assert_eq!(find(&habits, "4f1"), Ok(None));
    }
}
