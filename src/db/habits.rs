//! SQLite rows for habits.

use crate::libs::habit::{clamp_importance, Habit};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

const INSERT_HABIT: &str = "INSERT INTO habits (id, name, importance, resources, description, goal, time_spent, color, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

const UPDATE_HABIT: &str = "UPDATE habits
    SET name = ?2, importance = ?3, resources = ?4, description = ?5, goal = ?6, time_spent = ?7, color = ?8, updated_at = ?9
    WHERE id = ?1";

const SELECT_HABITS: &str = "SELECT id, name, importance, resources, description, goal, time_spent, color, created_at, updated_at
    FROM habits ORDER BY created_at DESC, rowid DESC";

const SELECT_HABIT: &str = "SELECT id, name, importance, resources, description, goal, time_spent, color, created_at, updated_at
    FROM habits WHERE id = ?1";

const DELETE_HABIT: &str = "DELETE FROM habits WHERE id = ?1";

pub struct Habits {
    pub conn: Arc<Mutex<Connection>>,
}

impl Habits {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn insert(&self, habit: &Habit) -> rusqlite::Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            INSERT_HABIT,
            params![
                habit.id,
                habit.name,
                habit.importance,
                resources_to_json(&habit.resources),
                habit.description,
                habit.goal,
                habit.time_spent.num_milliseconds(),
                habit.color,
                habit.created_at,
                habit.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Rewrites every mutable column. Returns the number of rows touched.
    pub fn update(&self, habit: &Habit) -> rusqlite::Result<usize> {
        let conn = self.conn.lock();
        conn.execute(
            UPDATE_HABIT,
            params![
                habit.id,
                habit.name,
                habit.importance,
                resources_to_json(&habit.resources),
                habit.description,
                habit.goal,
                habit.time_spent.num_milliseconds(),
                habit.color,
                habit.updated_at,
            ],
        )
    }

    pub fn delete(&self, id: &str) -> rusqlite::Result<usize> {
        let conn = self.conn.lock();
        conn.execute(DELETE_HABIT, params![id])
    }

    /// Newest first.
    pub fn fetch_all(&self) -> rusqlite::Result<Vec<Habit>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_HABITS)?;
        let habits = stmt.query_map([], habit_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(habits)
    }

    pub fn fetch(&self, id: &str) -> rusqlite::Result<Option<Habit>> {
        let conn = self.conn.lock();
        conn.query_row(SELECT_HABIT, params![id], habit_from_row).optional()
    }
}

fn resources_to_json(resources: &[String]) -> String {
    serde_json::to_string(resources).unwrap_or_else(|_| "[]".to_string())
}

fn habit_from_row(row: &Row) -> rusqlite::Result<Habit> {
    let resources: String = row.get(3)?;
    let resources = serde_json::from_str(&resources)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        importance: clamp_importance(row.get::<_, i64>(2)?),
        resources,
        description: row.get(4)?,
        goal: row.get(5)?,
        time_spent: Duration::milliseconds(row.get(6)?),
        color: row.get(7)?,
        created_at: row.get::<_, DateTime<Utc>>(8)?,
        updated_at: row.get::<_, DateTime<Utc>>(9)?,
    })
}
