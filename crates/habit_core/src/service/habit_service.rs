//! Habit use-case service.
//!
//! # Responsibility
//! - Provide create/edit/delete/complete entry points addressed by habit name.
//! - Feed store data into the status evaluator and streak analytics.
//!
//! # Invariants
//! - Service APIs never bypass store validation/persistence contracts.
//! - Service layer remains storage-agnostic (`S: HabitStore`).

use crate::analytics::{
    filter_by_periodicity, habit_streak_summary, longest_streak_overall, streak_summaries,
    HabitStreakSummary, LongestStreaks,
};
use crate::dates::format_date;
use crate::model::habit::{Completion, Habit, HabitId, NewHabit, Periodicity};
use crate::repo::habit_repo::{HabitDetails, HabitStore, RepoError, RepoResult};
use crate::status::{partition_by_status, pending_habits, HabitStatusEntry, StatusReport};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

/// Partial update for an existing habit. `None` or blank values keep the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitEdit {
    pub new_name: Option<String>,
    pub new_description: Option<String>,
    pub new_periodicity: Option<Periodicity>,
}

impl HabitEdit {
    pub fn is_empty(&self) -> bool {
        non_blank(self.new_name.as_deref()).is_none()
            && non_blank(self.new_description.as_deref()).is_none()
            && self.new_periodicity.is_none()
    }
}

/// Result of marking a habit as completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOutcome {
    Recorded,
    /// The same habit/date pair was already stored; nothing changed.
    AlreadyRecorded,
}

/// Use-case service over any habit store.
pub struct HabitService<S: HabitStore> {
    store: S,
}

impl<S: HabitStore> HabitService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a habit dated `creation_date`.
    ///
    /// # Errors
    /// - `Validation` for a blank name.
    /// - `DuplicateName` when the name is taken.
    pub fn create_habit(
        &self,
        name: &str,
        description: &str,
        periodicity: Periodicity,
        creation_date: NaiveDate,
    ) -> RepoResult<Habit> {
        let draft = NewHabit::new(name, description, periodicity, creation_date)?;
        let habit = self.store.create_habit(&draft)?;
        info!(
            "event=habit_create module=service status=ok habit_id={} periodicity={}",
            habit.id, habit.periodicity
        );
        Ok(habit)
    }

    /// Applies a partial edit to the habit called `name`.
    pub fn edit_habit(&self, name: &str, edit: &HabitEdit) -> RepoResult<Habit> {
        let mut habit = self.require_by_name(name)?;

        if let Some(new_name) = non_blank(edit.new_name.as_deref()) {
            habit.name = new_name.to_string();
        }
        if let Some(new_description) = non_blank(edit.new_description.as_deref()) {
            habit.description = new_description.to_string();
        }
        if let Some(new_periodicity) = edit.new_periodicity {
            habit.periodicity = new_periodicity;
        }

        self.store.update_habit(&habit)?;
        info!(
            "event=habit_update module=service status=ok habit_id={}",
            habit.id
        );
        Ok(habit)
    }

    /// Deletes the habit called `name` together with its completions.
    pub fn delete_habit(&self, name: &str) -> RepoResult<Habit> {
        let habit = self.require_by_name(name)?;
        self.store.delete_habit(habit.id)?;
        info!(
            "event=habit_delete module=service status=ok habit_id={}",
            habit.id
        );
        Ok(habit)
    }

    pub fn get_habit_by_name(&self, name: &str) -> RepoResult<Option<Habit>> {
        self.store.find_habit_by_name(name)
    }

    /// Every habit with description and last completion, ordered by name.
    pub fn list_habits_with_details(&self) -> RepoResult<Vec<HabitDetails>> {
        let mut details = self.store.habits_with_last_completion()?;
        details.sort_by(|left, right| left.habit.name.cmp(&right.habit.name));
        Ok(details)
    }

    /// Records a completion; repeating the same date is a no-op.
    pub fn mark_completed(&self, habit_id: HabitId, date: NaiveDate) -> RepoResult<CompletionOutcome> {
        let inserted = self.store.record_completion(&Completion {
            habit_id,
            completion_date: date,
        })?;
        let outcome = if inserted {
            CompletionOutcome::Recorded
        } else {
            CompletionOutcome::AlreadyRecorded
        };
        info!(
            "event=habit_complete module=service status=ok habit_id={} date={} outcome={:?}",
            habit_id,
            format_date(date),
            outcome
        );
        Ok(outcome)
    }

    /// Same as `mark_completed`, addressing the habit by name.
    pub fn mark_completed_by_name(
        &self,
        name: &str,
        date: NaiveDate,
    ) -> RepoResult<(Habit, CompletionOutcome)> {
        let habit = self.require_by_name(name)?;
        let outcome = self.mark_completed(habit.id, date)?;
        Ok((habit, outcome))
    }

    /// Completed and pending habits for `reference`, in id order.
    pub fn check_status(&self, reference: NaiveDate) -> RepoResult<StatusReport> {
        Ok(partition_by_status(self.status_entries()?, reference))
    }

    /// Habits not yet completed in their period containing `reference`.
    pub fn pending_habits(&self, reference: NaiveDate) -> RepoResult<Vec<HabitStatusEntry>> {
        Ok(pending_habits(self.status_entries()?, reference))
    }

    pub fn longest_streaks(&self) -> RepoResult<LongestStreaks> {
        longest_streak_overall(&self.store)
    }

    pub fn filter_by_periodicity(&self, periodicity: Periodicity) -> RepoResult<Vec<Habit>> {
        filter_by_periodicity(&self.store, periodicity)
    }

    pub fn streak_summaries(&self, today: NaiveDate) -> RepoResult<Vec<HabitStreakSummary>> {
        streak_summaries(&self.store, today)
    }

    /// Longest and current streak of the habit called `name`.
    pub fn habit_streak(&self, name: &str, today: NaiveDate) -> RepoResult<HabitStreakSummary> {
        let habit = self.require_by_name(name)?;
        habit_streak_summary(&self.store, habit, today)
    }

    fn status_entries(&self) -> RepoResult<Vec<HabitStatusEntry>> {
        Ok(self
            .store
            .habits_with_last_completion()?
            .iter()
            .map(HabitDetails::status_entry)
            .collect())
    }

    fn require_by_name(&self, name: &str) -> RepoResult<Habit> {
        self.store
            .find_habit_by_name(name)?
            .ok_or_else(|| RepoError::NameNotFound(name.trim().to_string()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
