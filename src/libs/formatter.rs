//! Human-readable durations.
//!
//! ```rust
//! use habitual::libs::formatter::{format_clock, format_duration};
//! use chrono::Duration;
//!
//! assert_eq!(format_clock(&Duration::seconds(75)), "01:15");
//! assert_eq!(format_clock(&Duration::seconds(3725)), "01:02:05");
//! assert_eq!(format_duration(&Duration::minutes(135)), "2h 15m");
//! ```

use chrono::Duration;

/// Stopwatch display: `HH:MM:SS` from one hour on, `MM:SS` below.
/// Negative durations show as zero.
pub fn format_clock(duration: &Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Totals display: `2h 15m`, or just `15m` below one hour.
pub fn format_duration(duration: &Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
