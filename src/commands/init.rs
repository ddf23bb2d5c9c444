use crate::{
    libs::{
        config::Config,
        habit::{samples, HabitUpdate},
        messages::Message,
        repository::{HabitRepository, Store},
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Add the demo habits (Reading, Exercise, Meditation) if there are no habits yet
    #[arg(short, long)]
    samples: bool,
}

pub async fn cmd(init_args: InitArgs) -> Result<()> {
    let config = Config::init()?;
    config.save()?;
    msg_success!(Message::ConfigSaved);

    if init_args.samples {
        let store = Store::from_config(&config)?;
        seed_samples(&store).await?;
    }
    Ok(())
}

/// Creates the sample habits in an empty store. Returns how many were added.
pub async fn seed_samples<R: HabitRepository>(store: &R) -> Result<usize> {
    if !store.list().await?.is_empty() {
        msg_info!(Message::SamplesSkipped);
        return Ok(0);
    }

    let samples = samples();
    for sample in &samples {
        let habit = store.create(&sample.draft).await?;
        store.update(&habit.id, &HabitUpdate::time_spent(sample.time_spent)).await?;
    }

    msg_success!(Message::SamplesSeeded(samples.len()));
    Ok(samples.len())
}
