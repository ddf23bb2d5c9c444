use crate::{
    api::groq::Groq,
    libs::{
        config::Config,
        messages::Message,
        repository::{HabitRepository, Store},
        suggestions::Suggest,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let store = Store::from_config(&config)?;
    let habits = store.list().await?;

    let suggestions_config = config.suggestions();
    if suggestions_config.api_key.is_none() {
        msg_info!(Message::SuggestionsOffline);
    }

    let mut suggester = Groq::new(&suggestions_config, StdRng::from_entropy());
    let suggestions = suggester.suggest(&habits).await;

    msg_print!(Message::SuggestionsHeader, true);
    for (i, suggestion) in suggestions.iter().enumerate() {
        msg_print!(format!("{}. {}", i + 1, suggestion));
    }
    Ok(())
}
