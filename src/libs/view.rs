use super::formatter::{format_clock, format_duration};
use super::goal;
use super::habit::Habit;
use super::profile::{BreakdownRow, PerformanceScore, Profile};
use super::session::Session;
use prettytable::{row, Table};

const BAR_WIDTH: usize = 20;

/// `[#########-----------]` for a 0-100 percentage.
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub struct View {}

impl View {
    pub fn habits(habits: &[Habit]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "IMPORTANCE", "GOAL", "TIME SPENT", "PROGRESS"]);
        for habit in habits {
            table.add_row(row![
                short_id(&habit.id),
                habit.name,
                format!("{}/10", habit.importance),
                habit.goal,
                format_duration(&habit.time_spent),
                format!("{} {:.0}%", progress_bar(habit.progress(), BAR_WIDTH / 2), habit.progress())
            ]);
        }
        table.printstd();
    }

    pub fn habit(habit: &Habit) {
        let target = goal::goal_target(&habit.goal);
        let target = if target == chrono::Duration::zero() { "-".to_string() } else { format_duration(&target) };

        let mut table = Table::new();
        table.add_row(row!["ID", habit.id]);
        table.add_row(row!["Name", habit.name]);
        table.add_row(row!["Description", habit.description]);
        table.add_row(row!["Importance", format!("{}/10", habit.importance)]);
        table.add_row(row!["Goal", format!("{} (target {})", habit.goal, target)]);
        table.add_row(row!["Time spent", format_duration(&habit.time_spent)]);
        table.add_row(row!["Progress", format!("{} {:.1}%", progress_bar(habit.progress(), BAR_WIDTH), habit.progress())]);
        table.add_row(row!["Resources", habit.resources.join("\n")]);
        table.add_row(row!["Colour", habit.color()]);
        table.add_row(row!["Created", habit.created_at.format("%Y-%m-%d %H:%M")]);
        table.add_row(row!["Updated", habit.updated_at.format("%Y-%m-%d %H:%M")]);
        table.printstd();
    }

    pub fn sessions(sessions: &[Session]) {
        let mut table = Table::new();

        table.add_row(row!["DATE", "START", "END", "DURATION"]);
        for session in sessions {
            let start = session.start.with_timezone(&chrono::Local);
            let end = session
                .end
                .map(|end| end.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "active".to_string());
            table.add_row(row![start.format("%Y-%m-%d"), start.format("%H:%M:%S"), end, format_clock(&session.duration)]);
        }
        table.printstd();
    }

    pub fn profile(profile: &Profile) {
        let mut table = Table::new();
        table.add_row(row!["Active habits", profile.active_habits]);
        table.add_row(row!["Total time", format_duration(&profile.total_time_spent)]);
        table.add_row(row!["Average importance", format!("{:.1}/10", profile.average_importance)]);
        table.printstd();
    }

    pub fn scores(scores: &[PerformanceScore]) {
        let mut table = Table::new();

        table.add_row(row!["HABIT", "SCORE", ""]);
        for score in scores {
            table.add_row(row![score.label, score.score, progress_bar(score.score as f64, BAR_WIDTH)]);
        }
        table.printstd();
    }

    pub fn breakdown(rows: &[BreakdownRow]) {
        let mut table = Table::new();

        table.add_row(row!["HABIT", "PROGRESS", "TIME / GOAL"]);
        for line in rows {
            table.add_row(row![line.name, format!("{}%", line.progress), format!("{} / {}", format_duration(&line.time_spent), line.goal)]);
        }
        table.printstd();
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
