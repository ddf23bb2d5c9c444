use super::resolve_habit;
use crate::{
    libs::{
        config::Config,
        formatter::format_duration,
        messages::Message,
        repository::{HabitRepository, Store},
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Duration;
use clap::Args;

#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// Habit ID or name
    habit: String,
}

pub async fn cmd(args: SessionsArgs) -> Result<()> {
    let store = Store::from_config(&Config::read()?)?;
    let habit = resolve_habit(&store, &args.habit).await?;
    let sessions = store.list_sessions(&habit.id).await?;

    if sessions.is_empty() {
        msg_info!(Message::SessionsNotFound(habit.name));
        return Ok(());
    }

    msg_print!(Message::SessionsHeader(habit.name), true);
    View::sessions(&sessions);

    let total = sessions.iter().fold(Duration::zero(), |sum, session| sum + session.duration);
    msg_print!(format!("{} session(s), {} in total", sessions.len(), format_duration(&total)));
    Ok(())
}
