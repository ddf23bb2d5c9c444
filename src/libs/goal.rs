//! Goal strings and progress.
//!
//! Goals are free text such as "1 hour/day" or "30 mins/day". Two parsers
//! exist and they deliberately disagree:
//!
//! - [`goal_hours`] takes the first integer in the string as a number of
//!   hours and drives the progress percentage. "30 mins/day" therefore means
//!   30 hours. This is lossy and locale-naive, and progress numbers depend on
//!   it exactly as it is.
//! - [`goal_target`] understands hour and minute units and is only used to
//!   show the target next to a habit.

use chrono::Duration;
use regex::Regex;
use std::sync::LazyLock;

/// Goal hours used when the goal string has no usable number.
pub const DEFAULT_GOAL_HOURS: f64 = 1.0;

static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").expect("valid goal number pattern"));
static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:hour|hr)s?").expect("valid goal hours pattern"));
static MINUTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:minute|min)s?").expect("valid goal minutes pattern"));

const MS_PER_HOUR: f64 = 3_600_000.0;

/// First integer in `goal`, read as hours. Falls back to one hour when no
/// digits are present or the number is zero.
pub fn goal_hours(goal: &str) -> f64 {
    FIRST_NUMBER
        .captures(goal)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|hours| *hours > 0.0)
        .unwrap_or(DEFAULT_GOAL_HOURS)
}

/// Unclamped completion: time spent over goal hours, in percent.
pub fn completion_percentage(time_spent: Duration, goal: &str) -> f64 {
    let spent_hours = time_spent.num_milliseconds().max(0) as f64 / MS_PER_HOUR;
    spent_hours / goal_hours(goal) * 100.0
}

/// Completion clamped to 100.
pub fn progress_percentage(time_spent: Duration, goal: &str) -> f64 {
    completion_percentage(time_spent, goal).min(100.0)
}

/// Target duration described by `goal`, summing its hour and minute parts.
/// Returns zero when neither unit appears or the total does not fit a duration.
pub fn goal_target(goal: &str) -> Duration {
    let amount = |re: &Regex| -> i64 { re.captures(goal).and_then(|caps| caps[1].parse::<i64>().ok()).unwrap_or(0) };

    amount(&HOURS)
        .checked_mul(60)
        .and_then(|minutes| minutes.checked_add(amount(&MINUTES)))
        .and_then(Duration::try_minutes)
        .unwrap_or_else(Duration::zero)
}
