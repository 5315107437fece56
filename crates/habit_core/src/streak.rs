//! Streak calculator over completion dates.
//!
//! # Responsibility
//! - Compute longest and current streaks for one habit.
//! - Expose the underlying consecutive-period runs.
//!
//! # Invariants
//! - Pure functions: no I/O, no hidden state, identical input gives identical output.
//! - Input order does not matter; dates are sorted and duplicate periods collapse.
//! - A run continues only when consecutive distinct buckets differ by exactly one.

use crate::dates::bucket;
use crate::model::habit::Periodicity;
use chrono::NaiveDate;
use serde::Serialize;

/// One maximal run of consecutive periods with at least one completion each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakRun {
    /// Earliest completion date in the run.
    pub first: NaiveDate,
    /// Latest completion date in the run.
    pub last: NaiveDate,
    /// Number of periods (days or weeks) covered.
    pub length: u32,
}

/// Splits completion dates into maximal runs, oldest first.
pub fn streak_runs(dates: &[NaiveDate], periodicity: Periodicity) -> Vec<StreakRun> {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut runs: Vec<StreakRun> = Vec::new();
    let mut previous_bucket: Option<i64> = None;

    for date in sorted {
        let current_bucket = bucket(date, periodicity);
        match (previous_bucket, runs.last_mut()) {
            // Same period as the previous date: extends the run's span only.
            (Some(prev), Some(run)) if current_bucket == prev => run.last = date,
            (Some(prev), Some(run)) if current_bucket == prev + 1 => {
                run.last = date;
                run.length += 1;
            }
            _ => runs.push(StreakRun {
                first: date,
                last: date,
                length: 1,
            }),
        }
        previous_bucket = Some(current_bucket);
    }

    runs
}

/// Length of the longest run of consecutive periods.
///
/// Empty input yields 0; a single date yields 1.
pub fn longest_streak(dates: &[NaiveDate], periodicity: Periodicity) -> u32 {
    streak_runs(dates, periodicity)
        .iter()
        .map(|run| run.length)
        .max()
        .unwrap_or(0)
}

/// Length of the run that is still alive as of `today`.
///
/// Completions dated after `today` are ignored. The run is alive when its
/// latest period is today's period or the one right before it (the current
/// period is not over yet); otherwise the current streak is 0.
pub fn current_streak(dates: &[NaiveDate], periodicity: Periodicity, today: NaiveDate) -> u32 {
    let past: Vec<NaiveDate> = dates.iter().copied().filter(|date| *date <= today).collect();
    let Some(latest_run) = streak_runs(&past, periodicity).pop() else {
        return 0;
    };

    let periods_since = bucket(today, periodicity) - bucket(latest_run.last, periodicity);
    if periods_since <= 1 {
        latest_run.length
    } else {
        0
    }
}
