pub mod habit;
pub mod init;
pub mod profile;
pub mod sessions;
pub mod suggest;
pub mod timer;

use crate::libs::habit::{self as habits, Habit};
use crate::libs::messages::Message;
use crate::libs::repository::HabitRepository;
use crate::msg_bail_anyhow;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure storage, suggestions and the timer")]
    Init(init::InitArgs),
    #[command(about = "Add, list, show, edit and delete habits", arg_required_else_help = true)]
    Habit(habit::HabitArgs),
    #[command(about = "Track time for a habit", arg_required_else_help = true)]
    Timer(timer::TimerArgs),
    #[command(about = "Show the recorded sessions of a habit")]
    Sessions(sessions::SessionsArgs),
    #[command(about = "Show overall statistics and performance scores")]
    Profile,
    #[command(about = "Suggest ways to improve your habits")]
    Suggest,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args).await,
            Commands::Habit(args) => habit::cmd(args).await,
            Commands::Timer(args) => timer::cmd(args).await,
            Commands::Sessions(args) => sessions::cmd(args).await,
            Commands::Profile => profile::cmd().await,
            Commands::Suggest => suggest::cmd().await,
        }
    }
}

/// Looks a habit up by ID or name, failing with a user-facing message.
pub async fn resolve_habit<R: HabitRepository>(store: &R, reference: &str) -> Result<Habit> {
    let all = store.list().await?;
    match habits::find(&all, reference) {
        Ok(Some(habit)) => Ok(habit.clone()),
        Ok(None) => msg_bail_anyhow!(Message::HabitNotFound(reference.to_string())),
        Err(_) => msg_bail_anyhow!(Message::HabitAmbiguous(reference.to_string())),
    }
}
