//! Suggestions from an OpenAI-compatible chat completion API (Groq by default).
//!
//! The model is asked for a JSON array of three strings. Anything else that
//! comes back, and every transport or HTTP failure, is logged and answered
//! from the built-in pool instead.

use crate::libs::config::ConfigModule;
use crate::libs::goal;
use crate::libs::habit::Habit;
use crate::libs::messages::Message;
use crate::libs::suggestions::{FallbackSuggester, Suggest, SUGGESTION_COUNT};
use crate::msg_print;
use dialoguer::{theme::ColorfulTheme, Input};
use rand::Rng;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const COMPLETIONS_URL: &str = "chat/completions";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

const SYSTEM_PROMPT: &str =
    "You are a habit coach that provides specific, actionable advice. Always respond with a JSON array of exactly 3 suggestion strings.";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SuggestionsConfig {
    pub api_url: String,
    /// Without a key no request is made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl SuggestionsConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "suggestions".to_string(),
            name: Message::ConfigModuleSuggestions.to_string(),
        }
    }

    pub fn init(config: &Option<SuggestionsConfig>) -> anyhow::Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleSuggestions);

        let api_url: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSuggestionsApiUrl.to_string())
            .default(config.api_url)
            .interact_text()?;
        let api_key: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSuggestionsApiKey.to_string())
            .default(config.api_key.unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;
        let model: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSuggestionsModel.to_string())
            .default(config.model)
            .interact_text()?;

        Ok(Self {
            api_url,
            api_key: Some(api_key).filter(|key| !key.trim().is_empty()),
            model,
        })
    }
}

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("response has no choices")]
    NoChoices,

    #[error("completion is not a JSON array of strings: {0}")]
    Content(String),

    #[error("completion contained no suggestions")]
    Empty,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// One line per habit, e.g. `Reading (Importance: 8/10, Goal: 1 hour/day, Progress: 50.0%)`.
///
/// Progress here is the unclamped completion, so overachieved habits show
/// more than 100%.
pub fn habit_context(habits: &[Habit]) -> String {
    habits
        .iter()
        .map(|habit| {
            format!(
                "{} (Importance: {}/10, Goal: {}, Progress: {:.1}%)",
                habit.name,
                habit.importance,
                habit.goal,
                goal::completion_percentage(habit.time_spent, &habit.goal)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn user_prompt(habits: &[Habit]) -> String {
    format!(
        "Based on these habits: {}. Provide 3 specific, actionable suggestions to improve habit consistency and achievement. \
         Focus on practical tips that consider their current progress and importance levels. Format as a JSON array of strings.",
        habit_context(habits)
    )
}

/// Reads the model's answer. Code fences around the array are tolerated.
pub fn parse_suggestions(content: &str) -> Result<Vec<String>, SuggestError> {
    let trimmed = content.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    let items: Vec<String> = serde_json::from_str(trimmed).map_err(|e| SuggestError::Content(e.to_string()))?;
    let items: Vec<String> = items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .take(SUGGESTION_COUNT)
        .collect();

    if items.is_empty() {
        return Err(SuggestError::Empty);
    }
    Ok(items)
}

pub struct Groq<R: Rng> {
    client: Client,
    config: SuggestionsConfig,
    fallback: FallbackSuggester<R>,
}

impl<R: Rng> Groq<R> {
    pub fn new(config: &SuggestionsConfig, rng: R) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            fallback: FallbackSuggester::new(rng),
        }
    }

    /// One completion request, without any fallback.
    pub async fn request(&self, api_key: &str, habits: &[Habit]) -> Result<Vec<String>, SuggestError> {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), COMPLETIONS_URL);
        let prompt = user_prompt(habits);
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage { role: "user", content: &prompt },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let res = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(SuggestError::Status { status: status.as_u16(), body: text });
        }

        let response: ChatResponse = serde_json::from_str(&text)?;
        let choice = response.choices.into_iter().next().ok_or(SuggestError::NoChoices)?;
        parse_suggestions(&choice.message.content)
    }
}

impl<R: Rng> Suggest for Groq<R> {
    async fn suggest(&mut self, habits: &[Habit]) -> Vec<String> {
        let Some(api_key) = self.config.api_key.clone() else {
            debug!("no suggestion API key configured, using built-in suggestions");
            return self.fallback.pick();
        };

        match self.request(&api_key, habits).await {
            Ok(suggestions) => suggestions,
            Err(error) => {
                warn!(%error, "suggestion request failed, using built-in suggestions");
                self.fallback.pick()
            }
        }
    }
}
