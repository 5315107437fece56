//! Completed/pending evaluation for a reference date.
//!
//! # Responsibility
//! - Classify one habit as completed or pending for its current period.
//! - Partition habit listings into completed and pending reports.
//!
//! # Invariants
//! - Daily habits are completed only by a completion on the exact reference day.
//! - Weekly habits are completed by any completion inside the Monday-Sunday
//!   window containing the reference date.
//! - Pending is exactly "not completed"; a habit never completed is pending.

use crate::dates::{format_date, week_end, week_start};
use crate::model::habit::{HabitId, Periodicity};
use chrono::NaiveDate;
use serde::Serialize;

/// Display value used when a habit has no completion yet.
pub const NEVER_COMPLETED: &str = "Never";

/// Outcome of evaluating a habit against a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitStatus {
    Completed,
    Pending,
}

/// Classifies a habit given its most recent completion.
pub fn evaluate_status(
    periodicity: Periodicity,
    last_completion: Option<NaiveDate>,
    reference: NaiveDate,
) -> HabitStatus {
    let Some(last) = last_completion else {
        return HabitStatus::Pending;
    };

    let completed = match periodicity {
        Periodicity::Daily => last == reference,
        Periodicity::Weekly => (week_start(reference)..=week_end(reference)).contains(&last),
    };

    if completed {
        HabitStatus::Completed
    } else {
        HabitStatus::Pending
    }
}

/// One habit together with its most recent completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStatusEntry {
    pub habit_id: HabitId,
    pub name: String,
    pub periodicity: Periodicity,
    pub last_completion: Option<NaiveDate>,
}

impl HabitStatusEntry {
    /// `YYYY-MM-DD`, or `Never` when the habit was never completed.
    pub fn last_completion_display(&self) -> String {
        self.last_completion
            .map(format_date)
            .unwrap_or_else(|| NEVER_COMPLETED.to_string())
    }

    pub fn status_on(&self, reference: NaiveDate) -> HabitStatus {
        evaluate_status(self.periodicity, self.last_completion, reference)
    }
}

/// Completed and pending habits for one reference date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub completed: Vec<HabitStatusEntry>,
    pub pending: Vec<HabitStatusEntry>,
}

/// Splits entries by status, keeping input order inside each side.
pub fn partition_by_status(entries: Vec<HabitStatusEntry>, reference: NaiveDate) -> StatusReport {
    let (completed, pending) = entries
        .into_iter()
        .partition(|entry| entry.status_on(reference) == HabitStatus::Completed);
    StatusReport { completed, pending }
}

/// Entries still pending for the reference date.
pub fn pending_habits(entries: Vec<HabitStatusEntry>, reference: NaiveDate) -> Vec<HabitStatusEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.status_on(reference) == HabitStatus::Pending)
        .collect()
}
