//! Habit store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `habits` and append-only writes over `completions`.
//! - Decode persisted rows into typed records, rejecting corrupt values.
//!
//! # Invariants
//! - Completion dates are returned in ascending chronological order.
//! - Recording an existing `(habit_id, date)` pair is a no-op.
//! - Deleting a habit removes its completions through the FK cascade.

use crate::dates::{format_date, parse_date};
use crate::db::migrations::{current_user_version, latest_version, SCHEMA_TABLES};
use crate::db::DbError;
use crate::model::habit::{Completion, Habit, HabitId, HabitValidationError, NewHabit, Periodicity};
use crate::status::HabitStatusEntry;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const HABIT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    periodicity,
    creation_date
FROM habits";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for habit persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(HabitValidationError),
    Db(DbError),
    NotFound(HabitId),
    NameNotFound(String),
    DuplicateName(String),
    InvalidData(String),
    /// Connection was not bootstrapped through `open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
            Self::NameNotFound(name) => write!(f, "habit with name '{name}' not found"),
            Self::DuplicateName(name) => write!(f, "a habit named '{name}' already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted habit data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HabitValidationError> for RepoError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Sort order for habit listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HabitOrder {
    /// Insertion order.
    #[default]
    Id,
    Name,
}

/// Query options for listing habits.
#[derive(Debug, Clone, Default)]
pub struct HabitListQuery {
    pub periodicity: Option<Periodicity>,
    pub order: HabitOrder,
}

/// Habit row joined with its most recent completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitDetails {
    #[serde(flatten)]
    pub habit: Habit,
    pub last_completion: Option<NaiveDate>,
}

impl HabitDetails {
    /// Projection consumed by the status evaluator.
    pub fn status_entry(&self) -> HabitStatusEntry {
        HabitStatusEntry {
            habit_id: self.habit.id,
            name: self.habit.name.clone(),
            periodicity: self.habit.periodicity,
            last_completion: self.last_completion,
        }
    }
}

/// Storage contract for habits and their completions.
pub trait HabitStore {
    fn create_habit(&self, habit: &NewHabit) -> RepoResult<Habit>;
    fn update_habit(&self, habit: &Habit) -> RepoResult<()>;
    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>>;
    fn find_habit_by_name(&self, name: &str) -> RepoResult<Option<Habit>>;
    fn list_habits(&self, query: &HabitListQuery) -> RepoResult<Vec<Habit>>;
    fn delete_habit(&self, id: HabitId) -> RepoResult<()>;
    /// Returns `false` when the completion already existed.
    fn record_completion(&self, completion: &Completion) -> RepoResult<bool>;
    /// Completion dates of one habit, ascending.
    fn completion_dates(&self, id: HabitId) -> RepoResult<Vec<NaiveDate>>;
    /// Every habit with its latest completion, in id order.
    fn habits_with_last_completion(&self) -> RepoResult<Vec<HabitDetails>>;
}

/// SQLite-backed habit store.
pub struct SqliteHabitStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHabitStore<'conn> {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when the schema is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        for table in SCHEMA_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(*table));
            }
        }

        Ok(Self { conn })
    }
}

impl HabitStore for SqliteHabitStore<'_> {
    fn create_habit(&self, habit: &NewHabit) -> RepoResult<Habit> {
        habit.validate()?;

        self.conn
            .execute(
                "INSERT INTO habits (name, description, periodicity, creation_date)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    habit.name.as_str(),
                    habit.description.as_str(),
                    habit.periodicity.as_str(),
                    format_date(habit.creation_date),
                ],
            )
            .map_err(|err| map_unique_name(err, &habit.name))?;

        Ok(habit.clone().into_habit(self.conn.last_insert_rowid()))
    }

    fn update_habit(&self, habit: &Habit) -> RepoResult<()> {
        habit.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE habits
                 SET
                    name = ?1,
                    description = ?2,
                    periodicity = ?3
                 WHERE id = ?4;",
                params![
                    habit.name.as_str(),
                    habit.description.as_str(),
                    habit.periodicity.as_str(),
                    habit.id,
                ],
            )
            .map_err(|err| map_unique_name(err, &habit.name))?;

        if changed == 0 {
            return Err(RepoError::NotFound(habit.id));
        }

        Ok(())
    }

    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HABIT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_habit_row(row)?));
        }

        Ok(None)
    }

    fn find_habit_by_name(&self, name: &str) -> RepoResult<Option<Habit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HABIT_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name.trim()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_habit_row(row)?));
        }

        Ok(None)
    }

    fn list_habits(&self, query: &HabitListQuery) -> RepoResult<Vec<Habit>> {
        let mut sql = format!("{HABIT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(periodicity) = query.periodicity {
            sql.push_str(" AND periodicity = ?");
            bind_values.push(Value::Text(periodicity.as_str().to_string()));
        }

        match query.order {
            HabitOrder::Id => sql.push_str(" ORDER BY id ASC"),
            HabitOrder::Name => sql.push_str(" ORDER BY name ASC, id ASC"),
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut habits = Vec::new();

        while let Some(row) = rows.next()? {
            habits.push(parse_habit_row(row)?);
        }

        Ok(habits)
    }

    fn delete_habit(&self, id: HabitId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn record_completion(&self, completion: &Completion) -> RepoResult<bool> {
        if self.get_habit(completion.habit_id)?.is_none() {
            return Err(RepoError::NotFound(completion.habit_id));
        }

        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO completions (habit_id, completion_date)
             VALUES (?1, ?2);",
            params![completion.habit_id, format_date(completion.completion_date)],
        )?;

        Ok(changed == 1)
    }

    fn completion_dates(&self, id: HabitId) -> RepoResult<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT completion_date
             FROM completions
             WHERE habit_id = ?1
             ORDER BY completion_date ASC;",
        )?;
        let mut rows = stmt.query([id])?;
        let mut dates = Vec::new();

        while let Some(row) = rows.next()? {
            let text: String = row.get(0)?;
            dates.push(parse_stored_date(&text, "completions.completion_date")?);
        }

        Ok(dates)
    }

    fn habits_with_last_completion(&self) -> RepoResult<Vec<HabitDetails>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                h.id AS id,
                h.name AS name,
                h.description AS description,
                h.periodicity AS periodicity,
                h.creation_date AS creation_date,
                MAX(c.completion_date) AS last_completion
             FROM habits h
             LEFT JOIN completions c ON c.habit_id = h.id
             GROUP BY h.id
             ORDER BY h.id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut details = Vec::new();

        while let Some(row) = rows.next()? {
            let habit = parse_habit_row(row)?;
            let last_completion = row
                .get::<_, Option<String>>("last_completion")?
                .map(|text| parse_stored_date(&text, "completions.completion_date"))
                .transpose()?;
            details.push(HabitDetails {
                habit,
                last_completion,
            });
        }

        Ok(details)
    }
}

fn parse_habit_row(row: &Row<'_>) -> RepoResult<Habit> {
    let periodicity_text: String = row.get("periodicity")?;
    let periodicity = periodicity_text.parse::<Periodicity>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid periodicity `{periodicity_text}` in habits.periodicity"
        ))
    })?;

    let creation_text: String = row.get("creation_date")?;
    let habit = Habit {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        periodicity,
        creation_date: parse_stored_date(&creation_text, "habits.creation_date")?,
    };
    habit.validate()?;
    Ok(habit)
}

fn parse_stored_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    parse_date(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}

fn map_unique_name(err: rusqlite::Error, name: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateName(name.to_string())
        }
        _ => err.into(),
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(exists.is_some())
}
