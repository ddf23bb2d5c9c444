use crate::{
    libs::{
        config::Config,
        messages::Message,
        profile::Profile,
        repository::{HabitRepository, Store},
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let store = Store::from_config(&Config::read()?)?;
    let habits = store.list().await?;

    if habits.is_empty() {
        msg_info!(Message::ProfileEmpty);
        return Ok(());
    }

    let profile = Profile::from_habits(&habits);
    msg_print!(Message::ProfileHeader, true);
    View::profile(&profile);
    msg_print!(Message::ProfileChartHeader, true);
    View::scores(&profile.scores);
    msg_print!(Message::ProfileBreakdownHeader, true);
    View::breakdown(&profile.breakdown);
    Ok(())
}
