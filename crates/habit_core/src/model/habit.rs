//! Habit and completion records.
//!
//! # Responsibility
//! - Define `Habit`, `NewHabit`, `Completion` and `Periodicity`.
//! - Validate user-provided habit fields before they reach persistence.
//!
//! # Invariants
//! - `name` is trimmed and non-empty for every validated habit.
//! - Parsing a periodicity never falls back to a default value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned habit identifier (SQLite rowid).
pub type HabitId = i64;

/// Cadence a habit is expected to be completed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    /// Once per calendar day.
    Daily,
    /// Once per ISO week (Monday to Sunday).
    Weekly,
}

impl Periodicity {
    /// Every supported periodicity, in report order.
    pub const ALL: [Periodicity; 2] = [Periodicity::Daily, Periodicity::Weekly];

    /// Stable lowercase name used in storage and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Plural unit used when rendering streak lengths.
    pub fn unit_label(self) -> &'static str {
        match self {
            Self::Daily => "days",
            Self::Weekly => "weeks",
        }
    }
}

impl Display for Periodicity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = HabitValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(HabitValidationError::InvalidPeriodicity(value.to_string())),
        }
    }
}

/// Validation failures for user-provided habit fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    /// Name is empty after trimming.
    EmptyName,
    /// Periodicity is neither `daily` nor `weekly`.
    InvalidPeriodicity(String),
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name cannot be empty"),
            Self::InvalidPeriodicity(value) => write!(
                f,
                "invalid periodicity `{value}`; expected daily|weekly"
            ),
        }
    }
}

impl Error for HabitValidationError {}

/// Persisted habit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub description: String,
    pub periodicity: Periodicity,
    /// Serialized as `YYYY-MM-DD`.
    pub creation_date: NaiveDate,
}

impl Habit {
    /// Checks the name invariant on an already materialized record.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        validate_name(&self.name)
    }
}

/// Habit draft before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub description: String,
    pub periodicity: Periodicity,
    pub creation_date: NaiveDate,
}

impl NewHabit {
    /// Builds a validated draft. Name and description are trimmed.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is blank.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        periodicity: Periodicity,
        creation_date: NaiveDate,
    ) -> Result<Self, HabitValidationError> {
        let draft = Self {
            name: name.into().trim().to_string(),
            description: description.into().trim().to_string(),
            periodicity,
            creation_date,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<(), HabitValidationError> {
        validate_name(&self.name)
    }

    /// Materializes the draft with a store-assigned id.
    pub fn into_habit(self, id: HabitId) -> Habit {
        Habit {
            id,
            name: self.name,
            description: self.description,
            periodicity: self.periodicity,
            creation_date: self.creation_date,
        }
    }
}

/// One recorded completion of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub habit_id: HabitId,
    pub completion_date: NaiveDate,
}

fn validate_name(name: &str) -> Result<(), HabitValidationError> {
    if name.trim().is_empty() {
        return Err(HabitValidationError::EmptyName);
    }
    Ok(())
}
