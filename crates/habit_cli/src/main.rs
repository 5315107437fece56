//! `habits` command-line entry point.
//!
//! # Responsibility
//! - Parse and validate user input (dates, periodicity) before it reaches core.
//! - Open the store, dispatch one command and render its result.

mod cli;
mod render;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use habit_core::db::{open_db, reset_db};
use habit_core::{
    default_log_level, format_date, init_logging, seed_demo_data, CompletionOutcome, HabitEdit,
    HabitService, LogSettings, SqliteHabitStore,
};
use log::info;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let settings = LogSettings::new(level, log_dir).context("invalid logging configuration")?;
        init_logging(&settings).context("failed to initialize logging")?;
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    info!(
        "event=cli_start module=cli status=ok command={:?} db={}",
        cli.command,
        cli.db.display()
    );

    let mut conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database {}", cli.db.display()))?;

    if let Command::Rebuild { yes } = cli.command {
        if !yes {
            bail!("refusing to rebuild without --yes; all habits and completions would be lost");
        }
        reset_db(&mut conn).context("failed to rebuild database")?;
        println!("Database has been rebuilt successfully.");
        return Ok(());
    }

    let store = SqliteHabitStore::try_new(&conn).context("database is not initialized")?;
    run(HabitService::new(store), cli.command, today)
}

fn run(
    service: HabitService<SqliteHabitStore<'_>>,
    command: Command,
    today: NaiveDate,
) -> Result<()> {
    match command {
        Command::Create {
            name,
            description,
            periodicity,
        } => {
            let habit = service.create_habit(&name, &description, periodicity, today)?;
            println!("Habit '{}' created successfully.", habit.name);
        }
        Command::List(output) => {
            let details = service.list_habits_with_details()?;
            if output.json {
                render::print_json(&details)?;
            } else {
                render::print_habit_details(&details);
            }
        }
        Command::Edit {
            name,
            new_name,
            new_description,
            new_periodicity,
        } => {
            let edit = HabitEdit {
                new_name,
                new_description,
                new_periodicity,
            };
            if edit.is_empty() {
                bail!("nothing to update; pass --name, --description or --periodicity");
            }
            service.edit_habit(&name, &edit)?;
            println!("Habit '{name}' was successfully updated.");
        }
        Command::Delete { name } => {
            let habit = service.delete_habit(&name)?;
            println!("Habit '{}' was deleted successfully.", habit.name);
        }
        Command::Complete { name, pick, date } => {
            let date = date.date.unwrap_or(today);
            let (habit_name, outcome) = match (name, pick) {
                (Some(name), _) => {
                    let (habit, outcome) = service.mark_completed_by_name(&name, date)?;
                    (habit.name, outcome)
                }
                (None, Some(choice)) => {
                    let pending = service.pending_habits(date)?;
                    let Some(entry) = choice.checked_sub(1).and_then(|idx| pending.get(idx)) else {
                        bail!(
                            "invalid choice {choice}; {} habit(s) pending on {}",
                            pending.len(),
                            format_date(date)
                        );
                    };
                    let outcome = service.mark_completed(entry.habit_id, date)?;
                    (entry.name.clone(), outcome)
                }
                (None, None) => {
                    render::print_pending(&service.pending_habits(date)?);
                    bail!("pass a habit name or --pick N to choose from the pending list");
                }
            };
            match outcome {
                CompletionOutcome::Recorded => println!(
                    "Habit '{habit_name}' marked as completed on {}.",
                    format_date(date)
                ),
                CompletionOutcome::AlreadyRecorded => println!(
                    "Habit '{habit_name}' is already marked as completed on {}.",
                    format_date(date)
                ),
            }
        }
        Command::Pending { date, output } => {
            let pending = service.pending_habits(date.date.unwrap_or(today))?;
            if output.json {
                render::print_json(&pending)?;
            } else {
                render::print_pending(&pending);
            }
        }
        Command::Status { date, output } => {
            let report = service.check_status(date.date.unwrap_or(today))?;
            if output.json {
                render::print_json(&report)?;
            } else {
                render::print_status(&report);
            }
        }
        Command::Longest(output) => {
            let streaks = service.longest_streaks()?;
            if output.json {
                render::print_json(&streaks)?;
            } else {
                render::print_longest(&streaks);
            }
        }
        Command::Filter {
            periodicity,
            output,
        } => {
            let habits = service.filter_by_periodicity(periodicity)?;
            if output.json {
                render::print_json(&habits)?;
            } else {
                render::print_filtered(periodicity, &habits);
            }
        }
        Command::Streaks { name, output } => {
            let summaries = match name {
                Some(name) => vec![service.habit_streak(&name, today)?],
                None => service.streak_summaries(today)?,
            };
            if output.json {
                render::print_json(&summaries)?;
            } else {
                render::print_streaks(&summaries);
            }
        }
        Command::Seed => {
            let report = seed_demo_data(service.store(), today)?;
            println!(
                "Database seeded successfully with test data ({} habits, {} completions added).",
                report.habits_created, report.completions_recorded
            );
        }
        Command::Rebuild { .. } => bail!("rebuild must run before the store is opened"),
    }

    Ok(())
}
