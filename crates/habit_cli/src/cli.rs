//! Command-line arguments.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use habit_core::{parse_date, Periodicity};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "habits")]
#[command(about = "Track daily and weekly habits and their streaks")]
#[command(version)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "HABITS_DB", default_value = "habits.db")]
    pub db: PathBuf,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, global = true, env = "HABITS_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "HABITS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Override the local date used as "today" (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = date_arg)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a habit
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = periodicity_arg)]
        periodicity: Periodicity,
    },
    /// List habits with description and last completion
    List(OutputArgs),
    /// Edit a habit; omitted or blank options keep the current value
    Edit {
        name: String,
        #[arg(long = "name")]
        new_name: Option<String>,
        #[arg(long = "description")]
        new_description: Option<String>,
        #[arg(long = "periodicity", value_parser = periodicity_arg)]
        new_periodicity: Option<Periodicity>,
    },
    /// Delete a habit and all its completions
    Delete { name: String },
    /// Mark a habit as completed on a date
    Complete {
        /// Habit name
        #[arg(conflicts_with = "pick")]
        name: Option<String>,
        /// Pick the N-th habit of the pending list for the date
        #[arg(long)]
        pick: Option<usize>,
        #[command(flatten)]
        date: DateArgs,
    },
    /// List habits still pending on a date
    Pending {
        #[command(flatten)]
        date: DateArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show completed and pending habits on a date
    Status {
        #[command(flatten)]
        date: DateArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the longest daily and weekly streak
    Longest(OutputArgs),
    /// List habits with the given periodicity
    Filter {
        #[arg(value_parser = periodicity_arg)]
        periodicity: Periodicity,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show longest and current streak per habit
    Streaks {
        /// Only this habit
        name: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Add demo habits and four weeks of completions
    Seed,
    /// Drop and recreate all tables
    Rebuild {
        /// Confirm that all data will be lost
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct DateArgs {
    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = date_arg)]
    pub date: Option<NaiveDate>,
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|err| err.to_string())
}

fn periodicity_arg(value: &str) -> Result<Periodicity, String> {
    value.parse::<Periodicity>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use habit_core::Periodicity;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_with_periodicity() {
        let cli = Cli::try_parse_from([
            "habits",
            "create",
            "Read",
            "--periodicity",
            "Weekly",
            "--description",
            "20 pages",
        ])
        .unwrap();
        match cli.command {
            Command::Create {
                name,
                description,
                periodicity,
            } => {
                assert_eq!(name, "Read");
                assert_eq!(description, "20 pages");
                assert_eq!(periodicity, Periodicity::Weekly);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates_and_periodicity() {
        assert!(Cli::try_parse_from(["habits", "status", "--date", "2024-1-5"]).is_err());
        assert!(Cli::try_parse_from(["habits", "filter", "monthly"]).is_err());
    }

    #[test]
    fn complete_name_conflicts_with_pick() {
        assert!(Cli::try_parse_from(["habits", "complete", "Read", "--pick", "1"]).is_err());
    }
}
