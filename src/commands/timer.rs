use super::resolve_habit;
use crate::{
    libs::{
        clock::SystemClock,
        config::Config,
        formatter::format_clock,
        habit::Habit,
        messages::Message,
        repository::{HabitRepository, Store},
        timer::{ArmOutcome, StartOutcome, StopOutcome, Timer, TimerError},
        timer_store::TimerFile,
        view::progress_bar,
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::io::{self, Write};

#[derive(Debug, Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    command: TimerCommand,
}

#[derive(Debug, Subcommand)]
enum TimerCommand {
    #[command(about = "Select a habit and reset the timer without starting it")]
    Select { habit: String },
    #[command(about = "Start or resume the timer")]
    Start {
        /// Defaults to the selected habit
        habit: Option<String>,
    },
    #[command(about = "Pause the running timer")]
    Pause,
    #[command(about = "Stop the timer and record the session")]
    Stop,
    #[command(about = "Show the timer")]
    Status,
    #[command(about = "Show the timer continuously until Ctrl+C")]
    Watch,
}

pub async fn cmd(args: TimerArgs) -> Result<()> {
    let config = Config::read()?;
    let store = Store::from_config(&config)?;
    let file = TimerFile::new()?;
    let mut timer = Timer::with_state(file.load()?, SystemClock);

    match args.command {
        TimerCommand::Select { habit } => handle_select(&store, &mut timer, &habit).await?,
        TimerCommand::Start { habit } => handle_start(&store, &mut timer, habit.as_deref()).await?,
        TimerCommand::Pause => handle_pause(&store, &mut timer).await?,
        TimerCommand::Stop => {
            let result = handle_stop(&store, &mut timer).await;
            // Whatever happened, the engine's state is the one to keep.
            file.save(timer.state())?;
            return result;
        }
        TimerCommand::Status => return handle_status(&store, &timer).await,
        TimerCommand::Watch => return handle_watch(&store, &file, config.poll_interval()).await,
    }

    file.save(timer.state())
}

/// Habit name for messages, or the ID if the habit is gone.
async fn habit_name<R: HabitRepository>(store: &R, habit_id: &str) -> String {
    match store.get(habit_id).await {
        Ok(Some(habit)) => habit.name,
        _ => habit_id.to_string(),
    }
}

async fn handle_select<R: HabitRepository>(store: &R, timer: &mut Timer<SystemClock>, reference: &str) -> Result<()> {
    let habit = resolve_habit(store, reference).await?;

    match timer.select_and_arm(&habit.id) {
        ArmOutcome::Armed => msg_success!(Message::TimerArmed(habit.name)),
        ArmOutcome::Busy { habit_id } => msg_warning!(Message::TimerBusy(habit_name(store, &habit_id).await)),
    }
    Ok(())
}

async fn handle_start<R: HabitRepository>(store: &R, timer: &mut Timer<SystemClock>, reference: Option<&str>) -> Result<()> {
    let habit = match reference {
        Some(reference) => resolve_habit(store, reference).await?,
        None => match timer.state().selected_habit_id() {
            Some(habit_id) => resolve_habit(store, habit_id).await?,
            None => {
                msg_error!(Message::TimerNoHabitSelected);
                return Ok(());
            }
        },
    };

    match timer.start(&habit.id) {
        StartOutcome::Started => msg_success!(Message::TimerStarted(habit.name)),
        StartOutcome::AlreadyRunning => msg_info!(Message::TimerAlreadyRunning(habit.name)),
        StartOutcome::Busy { habit_id } => msg_warning!(Message::TimerBusy(habit_name(store, &habit_id).await)),
    }
    Ok(())
}

async fn handle_pause<R: HabitRepository>(store: &R, timer: &mut Timer<SystemClock>) -> Result<()> {
    match timer.pause() {
        Some(elapsed) => {
            let habit_id = timer.state().selected_habit_id().unwrap_or_default().to_string();
            msg_success!(Message::TimerPaused(habit_name(store, &habit_id).await, format_clock(&elapsed)));
        }
        None => msg_info!(Message::TimerNotRunning),
    }
    Ok(())
}

async fn handle_stop<R: HabitRepository>(store: &R, timer: &mut Timer<SystemClock>) -> Result<()> {
    match timer.stop(store).await {
        Ok(StopOutcome::Recorded { session, habit }) => {
            let name = match habit {
                Some(habit) => habit.name,
                None => session.habit_id.clone(),
            };
            msg_success!(Message::TimerStopped(name, format_clock(&session.duration)));
            Ok(())
        }
        Ok(StopOutcome::Empty) => {
            msg_info!(Message::TimerNothingToRecord);
            Ok(())
        }
        Err(e) => {
            match &e {
                TimerError::SessionNotSaved { .. } => msg_error!(Message::TimerSessionKept(format_clock(&timer.state().elapsed()))),
                TimerError::HabitNotUpdated { session, .. } => {
                    msg_error!(Message::TimerHabitTotalNotUpdated(habit_name(store, &session.habit_id).await))
                }
            }
            Err(e.into())
        }
    }
}

fn status_line(name: &str, timer: &Timer<SystemClock>, progress: f64) -> String {
    let state = if timer.state().is_running() { "running" } else { "paused" };
    format!("{} [{}] {} {} {:.1}%", name, state, format_clock(&timer.tick()), progress_bar(progress, 20), progress)
}

async fn handle_status<R: HabitRepository>(store: &R, timer: &Timer<SystemClock>) -> Result<()> {
    let Some(habit_id) = timer.state().selected_habit_id() else {
        msg_info!(Message::TimerStatusIdle);
        return Ok(());
    };

    match store.get(habit_id).await? {
        Some(habit) => msg_print!(status_line(&habit.name, timer, timer.live_progress(&habit))),
        None => msg_print!(status_line(habit_id, timer, 0.0)),
    }
    Ok(())
}

/// Redraws the status line every `interval`. Other `habitual timer` calls
/// may change the timer meanwhile, so the snapshot is reloaded on each tick.
async fn handle_watch<R: HabitRepository>(store: &R, file: &TimerFile, interval: std::time::Duration) -> Result<()> {
    msg_info!(Message::TimerWatchHint);

    let mut habit: Option<Habit> = None;
    let mut ticker = tokio::time::interval(interval);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = ticker.tick() => {
                let timer = Timer::with_state(file.load()?, SystemClock);
                let line = match timer.state().selected_habit_id() {
                    None => {
                        habit = None;
                        Message::TimerStatusIdle.to_string()
                    }
                    Some(habit_id) => {
                        if habit.as_ref().map(|h| h.id.as_str()) != Some(habit_id) {
                            habit = store.get(habit_id).await?;
                        }
                        match &habit {
                            Some(habit) => status_line(&habit.name, &timer, timer.live_progress(habit)),
                            None => status_line(habit_id, &timer, 0.0),
                        }
                    }
                };
                print!("\r\x1b[2K{}", line);
                io::stdout().flush()?;
            }
        }
    }

    println!();
    Ok(())
}
