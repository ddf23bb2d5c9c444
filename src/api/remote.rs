//! Remote habit storage over a PostgREST table API.
//!
//! Works against a Supabase project or any PostgREST server exposing the
//! `habits` and `habit_sessions` tables. Rows use snake_case columns and
//! millisecond integer durations:
//!
//! ```text
//! GET    /rest/v1/habits?select=*&order=created_at.desc
//! POST   /rest/v1/habits                 Prefer: return=representation
//! PATCH  /rest/v1/habits?id=eq.{id}      Prefer: return=representation
//! DELETE /rest/v1/habits?id=eq.{id}      Prefer: return=representation
//! DELETE /rest/v1/habit_sessions?habit_id=eq.{id}
//! POST   /rest/v1/habit_sessions         Prefer: return=representation
//! GET    /rest/v1/habit_sessions?habit_id=eq.{id}&order=start_time.desc
//! ```

use crate::libs::config::ConfigModule;
use crate::libs::habit::{clamp_importance, Habit, HabitDraft, HabitUpdate};
use crate::libs::messages::Message;
use crate::libs::repository::{HabitRepository, Result, StoreError};
use crate::libs::session::{NewSession, Session};
use crate::msg_print;
use chrono::{DateTime, Duration, Utc};
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const REST_PREFIX: &str = "rest/v1";
const HABITS_TABLE: &str = "habits";
const SESSIONS_TABLE: &str = "habit_sessions";
const RETURN_REPRESENTATION: &str = "return=representation";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RemoteConfig {
    /// Project URL, without the `/rest/v1` suffix.
    pub api_url: String,
    /// Sent as the `apikey` header.
    pub api_key: String,
    /// Bearer token of a signed-in user. The API key is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Owner written to new rows, for tables without a server-side default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl RemoteConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "remote".to_string(),
            name: Message::ConfigModuleRemote.to_string(),
        }
    }

    pub fn init(config: &Option<RemoteConfig>) -> anyhow::Result<Self> {
        let config = config.clone().unwrap_or(Self {
            api_url: "".to_string(),
            api_key: "".to_string(),
            access_token: None,
            user_id: None,
        });
        msg_print!(Message::ConfigModuleRemote);

        let api_url: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptRemoteApiUrl.to_string())
            .default(config.api_url)
            .interact_text()?;
        let api_key: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptRemoteApiKey.to_string())
            .default(config.api_key)
            .interact_text()?;
        let access_token: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptRemoteAccessToken.to_string())
            .default(config.access_token.unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;
        let user_id: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptRemoteUserId.to_string())
            .default(config.user_id.unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        Ok(Self {
            api_url,
            api_key,
            access_token: Some(access_token).filter(|s| !s.trim().is_empty()),
            user_id: Some(user_id).filter(|s| !s.trim().is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct HabitRow {
    id: String,
    name: String,
    importance: i64,
    #[serde(default)]
    resources: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    goal: Option<String>,
    #[serde(default)]
    time_spent: Option<i64>,
    #[serde(default)]
    color: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HabitRow> for Habit {
    fn from(row: HabitRow) -> Self {
        Habit {
            id: row.id,
            name: row.name,
            importance: clamp_importance(row.importance),
            resources: row.resources.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            goal: row.goal.unwrap_or_default(),
            time_spent: Duration::milliseconds(row.time_spent.unwrap_or(0).max(0)),
            color: row.color,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct HabitInsert<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
    name: &'a str,
    description: &'a str,
    importance: u8,
    goal: &'a str,
    resources: &'a [String],
    time_spent: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct HabitPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    importance: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    goal: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resources: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_spent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

impl<'a> HabitPatch<'a> {
    fn new(update: &'a HabitUpdate, now: DateTime<Utc>) -> Self {
        Self {
            name: update.name.as_deref(),
            description: update.description.as_deref(),
            importance: update.importance.map(|i| clamp_importance(i as i64)),
            goal: update.goal.as_deref(),
            resources: update.resources.as_deref(),
            time_spent: update.time_spent.map(|d| d.num_milliseconds().max(0)),
            color: update.color.as_deref(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionRow {
    id: String,
    habit_id: String,
    start_time: DateTime<Utc>,
    #[serde(default)]
    end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    duration: Option<i64>,
    #[serde(default)]
    is_active: bool,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            habit_id: row.habit_id,
            start: row.start_time,
            end: row.end_time,
            duration: Duration::milliseconds(row.duration.unwrap_or(0)),
            active: row.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
struct SessionInsert<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
    habit_id: &'a str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    duration: i64,
    is_active: bool,
}

pub struct RemoteStore {
    client: Client,
    config: RemoteConfig,
}

impl RemoteStore {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/{}/{}", self.config.api_url.trim_end_matches('/'), REST_PREFIX, table);
        let token = self.config.access_token.as_deref().unwrap_or(&self.config.api_key);

        self.client
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let res = builder.send().await.map_err(|e| StoreError::Connectivity(e.to_string()))?;
        let status = res.status();
        debug!(status = status.as_u16(), url = %res.url(), "remote store response");

        match status {
            s if s.is_success() => Ok(res),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Unauthorized(res.text().await.unwrap_or_default())),
            s => Err(StoreError::Request {
                status: s.as_u16(),
                message: res.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn rows<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Vec<T>> {
        let res = self.send(builder).await?;
        let body = res.text().await.map_err(|e| StoreError::Connectivity(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// First row of a `return=representation` response.
    async fn single<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T> {
        self.rows(builder).await?.into_iter().next().ok_or_else(|| StoreError::NotFound(what.to_string()))
    }
}

impl HabitRepository for RemoteStore {
    async fn create(&self, draft: &HabitDraft) -> Result<Habit> {
        let body = HabitInsert {
            user_id: self.config.user_id.as_deref(),
            name: &draft.name,
            description: &draft.description,
            importance: draft.importance,
            goal: &draft.goal,
            resources: &draft.resources,
            time_spent: 0,
            color: draft.color.as_deref(),
        };
        let builder = self.request(Method::POST, HABITS_TABLE).header("Prefer", RETURN_REPRESENTATION).json(&body);
        let row: HabitRow = self.single(builder, "created habit").await?;
        Ok(row.into())
    }

    async fn update(&self, id: &str, update: &HabitUpdate) -> Result<Habit> {
        let builder = self
            .request(Method::PATCH, HABITS_TABLE)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&HabitPatch::new(update, Utc::now()));
        let row: HabitRow = self.single(builder, &format!("habit {}", id)).await?;
        Ok(row.into())
    }

    /// Deletes the habit row first; an empty representation means there was
    /// no such habit and nothing else is touched. Sessions left behind by a
    /// schema without `ON DELETE CASCADE` are removed afterwards.
    async fn delete(&self, id: &str) -> Result<()> {
        let habit = self
            .request(Method::DELETE, HABITS_TABLE)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", RETURN_REPRESENTATION);
        let _: HabitRow = self.single(habit, &format!("habit {}", id)).await?;

        let sessions = self.request(Method::DELETE, SESSIONS_TABLE).query(&[("habit_id", format!("eq.{}", id))]);
        if let Err(error) = self.send(sessions).await {
            warn!(%error, habit_id = id, "habit deleted but its sessions were not");
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Habit>> {
        let builder = self.request(Method::GET, HABITS_TABLE).query(&[("select", "*"), ("order", "created_at.desc")]);
        let rows: Vec<HabitRow> = self.rows(builder).await?;
        Ok(rows.into_iter().map(Habit::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Habit>> {
        let builder = self
            .request(Method::GET, HABITS_TABLE)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);
        let rows: Vec<HabitRow> = self.rows(builder).await?;
        Ok(rows.into_iter().next().map(Habit::from))
    }

    async fn create_session(&self, session: &NewSession) -> Result<Session> {
        let body = SessionInsert {
            user_id: self.config.user_id.as_deref(),
            habit_id: &session.habit_id,
            start_time: session.start,
            end_time: session.end,
            duration: session.duration.num_milliseconds(),
            is_active: false,
        };
        let builder = self.request(Method::POST, SESSIONS_TABLE).header("Prefer", RETURN_REPRESENTATION).json(&body);
        let row: SessionRow = self.single(builder, "created session").await?;
        Ok(row.into())
    }

    async fn list_sessions(&self, habit_id: &str) -> Result<Vec<Session>> {
        let builder = self.request(Method::GET, SESSIONS_TABLE).query(&[
            ("select", "*".to_string()),
            ("habit_id", format!("eq.{}", habit_id)),
            ("order", "start_time.desc".to_string()),
        ]);
        let rows: Vec<SessionRow> = self.rows(builder).await?;
        Ok(rows.into_iter().map(Session::from).collect())
    }
}
