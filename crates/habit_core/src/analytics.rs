//! Aggregate streak analytics across habits.
//!
//! # Responsibility
//! - Find the habit with the longest streak for each periodicity class.
//! - Filter habits by periodicity and summarize per-habit streaks.
//!
//! # Invariants
//! - Every call recomputes from the store; nothing is cached.
//! - An empty class reports the `None`/0 sentinel instead of failing.
//! - Ties on streak length go to the habit whose name sorts first.

use crate::model::habit::{Habit, HabitId, Periodicity};
use crate::repo::habit_repo::{HabitListQuery, HabitOrder, HabitStore, RepoResult};
use crate::streak::{current_streak, longest_streak};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Name reported when a periodicity class has no streak at all.
pub const NO_HABIT_NAME: &str = "None";

/// Habit holding the longest streak within one periodicity class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakLeader {
    /// `None` for the sentinel leader.
    pub habit_id: Option<HabitId>,
    pub name: String,
    pub streak: u32,
}

impl StreakLeader {
    /// Sentinel for a class without habits or completions.
    pub fn none() -> Self {
        Self {
            habit_id: None,
            name: NO_HABIT_NAME.to_string(),
            streak: 0,
        }
    }

    pub fn is_none(&self) -> bool {
        self.habit_id.is_none()
    }
}

/// Longest-streak winners per periodicity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongestStreaks {
    pub daily: StreakLeader,
    pub weekly: StreakLeader,
}

impl LongestStreaks {
    pub fn get(&self, periodicity: Periodicity) -> &StreakLeader {
        match periodicity {
            Periodicity::Daily => &self.daily,
            Periodicity::Weekly => &self.weekly,
        }
    }
}

/// Longest and current streak of one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStreakSummary {
    pub habit: Habit,
    pub longest: u32,
    pub current: u32,
}

/// Picks the maximal candidate; streak ties go to the smallest name.
///
/// Candidates with a zero streak never win, so an empty or completion-less
/// class yields `StreakLeader::none()`.
pub fn pick_leader(candidates: impl IntoIterator<Item = StreakLeader>) -> StreakLeader {
    candidates
        .into_iter()
        .filter(|candidate| candidate.streak > 0)
        .max_by(|left, right| {
            left.streak
                .cmp(&right.streak)
                .then_with(|| right.name.cmp(&left.name))
        })
        .unwrap_or_else(StreakLeader::none)
}

/// Computes the longest-streak leader for daily and weekly habits.
pub fn longest_streak_overall<S: HabitStore + ?Sized>(store: &S) -> RepoResult<LongestStreaks> {
    let started_at = Instant::now();
    let mut daily = Vec::new();
    let mut weekly = Vec::new();

    for habit in store.list_habits(&HabitListQuery::default())? {
        let dates = store.completion_dates(habit.id)?;
        let candidate = StreakLeader {
            habit_id: Some(habit.id),
            streak: longest_streak(&dates, habit.periodicity),
            name: habit.name,
        };
        match habit.periodicity {
            Periodicity::Daily => daily.push(candidate),
            Periodicity::Weekly => weekly.push(candidate),
        }
    }

    let result = LongestStreaks {
        daily: pick_leader(daily),
        weekly: pick_leader(weekly),
    };
    debug!(
        "event=analytics_longest module=analytics status=ok daily_streak={} weekly_streak={} duration_ms={}",
        result.daily.streak,
        result.weekly.streak,
        started_at.elapsed().as_millis()
    );
    Ok(result)
}

/// All habits with the requested periodicity, in insertion order.
pub fn filter_by_periodicity<S: HabitStore + ?Sized>(
    store: &S,
    periodicity: Periodicity,
) -> RepoResult<Vec<Habit>> {
    store.list_habits(&HabitListQuery {
        periodicity: Some(periodicity),
        order: HabitOrder::Id,
    })
}

/// Summary for one habit as of `today`.
pub fn habit_streak_summary<S: HabitStore + ?Sized>(
    store: &S,
    habit: Habit,
    today: NaiveDate,
) -> RepoResult<HabitStreakSummary> {
    let dates = store.completion_dates(habit.id)?;
    Ok(HabitStreakSummary {
        longest: longest_streak(&dates, habit.periodicity),
        current: current_streak(&dates, habit.periodicity, today),
        habit,
    })
}

/// Longest and current streak for every habit, ordered by name.
pub fn streak_summaries<S: HabitStore + ?Sized>(
    store: &S,
    today: NaiveDate,
) -> RepoResult<Vec<HabitStreakSummary>> {
    let habits = store.list_habits(&HabitListQuery {
        periodicity: None,
        order: HabitOrder::Name,
    })?;

    habits
        .into_iter()
        .map(|habit| habit_streak_summary(store, habit, today))
        .collect()
}
