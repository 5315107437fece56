//! Core domain logic for the habit tracker.
//! This crate owns habit invariants, the streak engine and the SQLite store.

pub mod analytics;
pub mod dates;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod status;
pub mod streak;

pub use analytics::{HabitStreakSummary, LongestStreaks, StreakLeader, NO_HABIT_NAME};
pub use dates::{format_date, parse_date, DateParseError};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::habit::{Completion, Habit, HabitId, HabitValidationError, NewHabit, Periodicity};
pub use repo::habit_repo::{
    HabitDetails, HabitListQuery, HabitOrder, HabitStore, RepoError, RepoResult, SqliteHabitStore,
};
pub use seed::{seed_demo_data, SeedReport};
pub use service::habit_service::{CompletionOutcome, HabitEdit, HabitService};
pub use status::{evaluate_status, HabitStatus, HabitStatusEntry, StatusReport, NEVER_COMPLETED};
pub use streak::{current_streak, longest_streak, StreakRun};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
