use super::resolve_habit;
use crate::{
    libs::{
        config::Config,
        habit::{sort_by_importance, Habit, HabitDraft, HabitUpdate, DEFAULT_GOAL, DEFAULT_IMPORTANCE, MAX_IMPORTANCE, MIN_IMPORTANCE},
        messages::Message,
        repository::{HabitRepository, Store},
        view::View,
    },
    msg_error_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Duration;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct HabitArgs {
    #[command(subcommand)]
    command: HabitCommand,
}

#[derive(Debug, Subcommand)]
enum HabitCommand {
    #[command(about = "Add a habit; prompts for details when no name is given")]
    Add {
        name: Option<String>,
        #[arg(short, long)]
        importance: Option<i64>,
        #[arg(short, long)]
        goal: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// May be repeated
        #[arg(short, long = "resource")]
        resources: Vec<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    #[command(about = "List habits, newest first")]
    List,
    #[command(about = "Show one habit")]
    Show { habit: String },
    #[command(about = "Edit a habit; prompts for every field when no option is given")]
    Edit {
        habit: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        importance: Option<i64>,
        #[arg(short, long)]
        goal: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Replaces all resources; may be repeated
        #[arg(short, long = "resource")]
        resources: Vec<String>,
        #[arg(short, long)]
        color: Option<String>,
        /// Overwrite the tracked total, in minutes
        #[arg(long)]
        time_spent: Option<i64>,
    },
    #[command(about = "Delete a habit and its sessions")]
    Delete {
        habit: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: HabitArgs) -> Result<()> {
    let store = Store::from_config(&Config::read()?)?;

    match args.command {
        HabitCommand::Add {
            name: Some(name),
            importance,
            goal,
            description,
            resources,
            color,
        } => {
            let draft = HabitDraft::new(
                &name,
                importance.unwrap_or(DEFAULT_IMPORTANCE as i64),
                goal.as_deref().unwrap_or(DEFAULT_GOAL),
            )
            .with_description(description.as_deref().unwrap_or(""))
            .with_resources(resources)
            .with_color(color);
            handle_add(&store, draft).await
        }
        HabitCommand::Add { name: None, .. } => handle_add(&store, prompt_draft()?).await,
        HabitCommand::List => handle_list(&store).await,
        HabitCommand::Show { habit } => handle_show(&store, &habit).await,
        HabitCommand::Edit {
            habit,
            name,
            importance,
            goal,
            description,
            resources,
            color,
            time_spent,
        } => {
            let time_spent = time_spent.map(minutes_to_duration).transpose()?;
            let update = HabitUpdate {
                name,
                importance: None,
                resources: Some(resources).filter(|r| !r.is_empty()),
                description,
                goal,
                time_spent,
                color,
            };
            let update = match importance {
                Some(importance) => update.importance(importance),
                None => update,
            };
            handle_edit(&store, &habit, update).await
        }
        HabitCommand::Delete { habit, yes } => handle_delete(&store, &habit, yes).await,
    }
}

async fn handle_add<R: HabitRepository>(store: &R, draft: HabitDraft) -> Result<()> {
    let habit = store.create(&draft).await?;
    msg_success!(Message::HabitCreated(habit.name));
    Ok(())
}

async fn handle_list<R: HabitRepository>(store: &R) -> Result<()> {
    let mut habits = store.list().await?;
    if habits.is_empty() {
        msg_info!(Message::HabitsNotFound);
        return Ok(());
    }

    sort_by_importance(&mut habits);
    msg_print!(Message::HabitsHeader, true);
    View::habits(&habits);
    Ok(())
}

async fn handle_show<R: HabitRepository>(store: &R, reference: &str) -> Result<()> {
    let habit = resolve_habit(store, reference).await?;
    msg_print!(Message::HabitDetailsHeader(habit.name.clone()), true);
    View::habit(&habit);
    Ok(())
}

async fn handle_edit<R: HabitRepository>(store: &R, reference: &str, update: HabitUpdate) -> Result<()> {
    let habit = resolve_habit(store, reference).await?;

    let update = if update.is_empty() {
        prompt_update(&habit)?
    } else {
        update
    };
    if update.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let habit = store.update(&habit.id, &update).await?;
    msg_success!(Message::HabitUpdated(habit.name));
    Ok(())
}

async fn handle_delete<R: HabitRepository>(store: &R, reference: &str, yes: bool) -> Result<()> {
    let habit = resolve_habit(store, reference).await?;

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteHabit(habit.name.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::HabitDeleteCancelled);
        return Ok(());
    }

    store.delete(&habit.id).await?;
    msg_success!(Message::HabitDeleted(habit.name));
    Ok(())
}

fn prompt_importance(default: i64) -> Result<i64> {
    let range_msg = Message::ImportanceRange.to_string();
    let importance = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitImportance.to_string())
        .default(default)
        .validate_with(|input: &i64| -> Result<(), &str> {
            if (MIN_IMPORTANCE as i64..=MAX_IMPORTANCE as i64).contains(input) {
                Ok(())
            } else {
                Err(&range_msg)
            }
        })
        .interact_text()?;
    Ok(importance)
}

/// `--time-spent` minutes as a duration; negative values count as zero.
fn minutes_to_duration(minutes: i64) -> Result<Duration> {
    Duration::try_minutes(minutes.max(0)).ok_or_else(|| msg_error_anyhow!(Message::TimeSpentOutOfRange(minutes)))
}

fn split_resources(input: &str) -> Vec<String> {
    input.split(',').map(str::trim).filter(|r| !r.is_empty()).map(str::to_string).collect()
}

fn prompt_draft() -> Result<HabitDraft> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitName.to_string())
        .interact_text()?;
    let importance = prompt_importance(DEFAULT_IMPORTANCE as i64)?;
    let goal: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitGoal.to_string())
        .default(DEFAULT_GOAL.to_string())
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitDescription.to_string())
        .allow_empty(true)
        .interact_text()?;
    let resources: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitResources.to_string())
        .allow_empty(true)
        .interact_text()?;

    Ok(HabitDraft::new(&name, importance, &goal)
        .with_description(&description)
        .with_resources(split_resources(&resources)))
}

/// Prompts for every field with the current value as default and keeps only
/// the ones that changed.
fn prompt_update(habit: &Habit) -> Result<HabitUpdate> {
    msg_print!(Message::HabitDetailsHeader(habit.name.clone()), true);

    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitName.to_string())
        .default(habit.name.clone())
        .interact_text()?;
    let importance = prompt_importance(habit.importance as i64)?;
    let goal: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitGoal.to_string())
        .default(habit.goal.clone())
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitDescription.to_string())
        .default(habit.description.clone())
        .allow_empty(true)
        .interact_text()?;
    let resources: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitResources.to_string())
        .default(habit.resources.join(", "))
        .allow_empty(true)
        .interact_text()?;
    let color: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHabitColor.to_string())
        .default(habit.color().to_string())
        .interact_text()?;
    let resources = split_resources(&resources);

    Ok(HabitUpdate {
        name: Some(name).filter(|n| *n != habit.name),
        importance: Some(importance as u8).filter(|i| *i != habit.importance),
        resources: Some(resources).filter(|r| *r != habit.resources),
        description: Some(description).filter(|d| *d != habit.description),
        goal: Some(goal).filter(|g| *g != habit.goal),
        time_spent: None,
        color: Some(color).filter(|c| c != habit.color()),
    })
}
