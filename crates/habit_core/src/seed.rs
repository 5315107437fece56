//! Demo data seeding.
//!
//! # Responsibility
//! - Populate a store with five daily and five weekly sample habits.
//! - Back-fill four weeks of completions relative to a given day.
//!
//! # Invariants
//! - Seeding is idempotent: existing habit names and completion dates are kept.
//! - Output depends only on the store contents and `today`.

use crate::model::habit::{Completion, NewHabit, Periodicity};
use crate::repo::habit_repo::{HabitListQuery, HabitStore, RepoResult};
use chrono::{Duration, NaiveDate};
use log::info;
use serde::Serialize;

const SEED_WINDOW_DAYS: i64 = 28;
const SEED_WINDOW_WEEKS: i64 = 4;

const DEMO_HABITS: &[(&str, &str, Periodicity)] = &[
    ("Drink Water", "Drink 8 glasses of water", Periodicity::Daily),
    ("Exercise", "30 minutes of physical exercise", Periodicity::Daily),
    ("Read", "Read 20 pages of a book", Periodicity::Daily),
    ("Meditate", "10 minutes of meditation", Periodicity::Daily),
    ("Journal", "Write down thoughts and goals", Periodicity::Daily),
    ("Grocery Shopping", "Buy weekly groceries", Periodicity::Weekly),
    ("Clean House", "Deep clean the house", Periodicity::Weekly),
    ("Meal Prep", "Prepare meals for the week", Periodicity::Weekly),
    ("Call Family", "Call parents or siblings", Periodicity::Weekly),
    ("Review Goals", "Review weekly goals and progress", Periodicity::Weekly),
];

/// Counts of rows written by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub habits_created: u32,
    pub completions_recorded: u32,
}

/// Seeds demo habits and completions ending at `today`.
pub fn seed_demo_data<S: HabitStore + ?Sized>(store: &S, today: NaiveDate) -> RepoResult<SeedReport> {
    let mut report = SeedReport::default();

    for (name, description, periodicity) in DEMO_HABITS {
        if store.find_habit_by_name(name)?.is_some() {
            continue;
        }
        store.create_habit(&NewHabit::new(*name, *description, *periodicity, today)?)?;
        report.habits_created += 1;
    }

    for habit in store.list_habits(&HabitListQuery::default())? {
        let (mut dates, max_extra_days_ago): (Vec<NaiveDate>, i64) = match habit.periodicity {
            Periodicity::Daily => (
                (0..SEED_WINDOW_DAYS)
                    .map(|days_ago| today - Duration::days(days_ago))
                    .collect(),
                SEED_WINDOW_DAYS - 1,
            ),
            Periodicity::Weekly => (
                (0..SEED_WINDOW_WEEKS)
                    .map(|weeks_ago| today - Duration::weeks(weeks_ago))
                    .collect(),
                (SEED_WINDOW_WEEKS - 1) * 7,
            ),
        };
        dates.extend(
            extra_days_ago(habit.id, max_extra_days_ago)
                .map(|days_ago| today - Duration::days(days_ago)),
        );

        for completion_date in dates {
            let inserted = store.record_completion(&Completion {
                habit_id: habit.id,
                completion_date,
            })?;
            if inserted {
                report.completions_recorded += 1;
            }
        }
    }

    info!(
        "event=seed module=seed status=ok habits_created={} completions_recorded={}",
        report.habits_created, report.completions_recorded
    );
    Ok(report)
}

/// Extra completions in `1..=max_days_ago`, varied per habit.
///
/// Offsets never reach a period older than the back-filled window, so the
/// seeded streak lengths stay fixed.
fn extra_days_ago(habit_id: i64, max_days_ago: i64) -> impl Iterator<Item = i64> {
    let count = 5 + habit_id.rem_euclid(6);
    (0..count).map(move |step| 1 + (habit_id * 7 + step * 11).rem_euclid(max_days_ago))
}
