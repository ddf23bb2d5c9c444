//! Aggregate statistics over all habits.

use crate::libs::habit::Habit;
use chrono::Duration;

/// Longest chart label before it is shortened.
const LABEL_MAX_CHARS: usize = 8;

/// One bar of the performance chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceScore {
    pub label: String,
    pub name: String,
    /// Progress weighted by importance, 0 to 100.
    pub score: u32,
}

impl PerformanceScore {
    pub fn for_habit(habit: &Habit) -> Self {
        let weighted = habit.progress() * habit.importance as f64 / 10.0;

        Self {
            label: chart_label(&habit.name),
            name: habit.name.clone(),
            score: weighted.round().clamp(0.0, 100.0) as u32,
        }
    }
}

/// The name cut to eight characters, with `...` appended when it was longer.
pub fn chart_label(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let head: String = name.chars().take(LABEL_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// One line of the detailed breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub name: String,
    /// Progress rounded to a whole percent.
    pub progress: u32,
    pub time_spent: Duration,
    pub goal: String,
}

impl BreakdownRow {
    pub fn for_habit(habit: &Habit) -> Self {
        Self {
            name: habit.name.clone(),
            progress: habit.progress().round() as u32,
            time_spent: habit.time_spent,
            goal: habit.goal.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub active_habits: usize,
    pub total_time_spent: Duration,
    /// Zero when there are no habits.
    pub average_importance: f64,
    pub scores: Vec<PerformanceScore>,
    /// Most time spent first.
    pub breakdown: Vec<BreakdownRow>,
}

impl Profile {
    pub fn from_habits(habits: &[Habit]) -> Self {
        let total_time_spent = habits.iter().fold(Duration::zero(), |sum, habit| sum + habit.time_spent);
        let average_importance = match habits.len() {
            0 => 0.0,
            n => habits.iter().map(|habit| habit.importance as f64).sum::<f64>() / n as f64,
        };

        let mut breakdown: Vec<BreakdownRow> = habits.iter().map(BreakdownRow::for_habit).collect();
        breakdown.sort_by(|a, b| b.time_spent.cmp(&a.time_spent));

        Self {
            active_habits: habits.len(),
            total_time_spent,
            average_importance,
            scores: habits.iter().map(PerformanceScore::for_habit).collect(),
            breakdown,
        }
    }
}
