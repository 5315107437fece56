//! Text and JSON rendering of command results.

use anyhow::Result;
use habit_core::{
    format_date, Habit, HabitDetails, HabitStatusEntry, HabitStreakSummary, LongestStreaks,
    Periodicity, StatusReport, NEVER_COMPLETED,
};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_habit_details(details: &[HabitDetails]) {
    if details.is_empty() {
        println!("No habits found.");
        return;
    }
    for item in details {
        let last = item
            .last_completion
            .map(format_date)
            .unwrap_or_else(|| NEVER_COMPLETED.to_string());
        println!("- {} ({})", item.habit.name, item.habit.periodicity);
        println!("  Description: {}", item.habit.description);
        println!("  Last Completed: {last}");
    }
}

pub fn print_pending(pending: &[HabitStatusEntry]) {
    if pending.is_empty() {
        println!("No pending habits for the selected date.");
        return;
    }
    println!("Pending Habits:");
    for (idx, entry) in pending.iter().enumerate() {
        println!(
            "{}. {} ({}, Last Completed: {})",
            idx + 1,
            entry.name,
            entry.periodicity,
            entry.last_completion_display()
        );
    }
}

pub fn print_status(report: &StatusReport) {
    println!("Completed Habits:");
    print_status_section(&report.completed, "No completed habits.");
    println!();
    println!("Pending Habits:");
    print_status_section(&report.pending, "No pending habits.");
}

fn print_status_section(entries: &[HabitStatusEntry], empty_message: &str) {
    if entries.is_empty() {
        println!("{empty_message}");
    }
    for entry in entries {
        println!(
            "- {} ({} / Last Completed: {})",
            entry.name,
            entry.periodicity,
            entry.last_completion_display()
        );
    }
}

pub fn print_longest(streaks: &LongestStreaks) {
    for periodicity in Periodicity::ALL {
        let leader = streaks.get(periodicity);
        println!(
            "The longest {} streak is: {} {} on habit: {}.",
            periodicity,
            leader.streak,
            periodicity.unit_label(),
            leader.name
        );
    }
}

pub fn print_filtered(periodicity: Periodicity, habits: &[Habit]) {
    if habits.is_empty() {
        println!("No habits with periodicity '{periodicity}' found.");
        return;
    }
    println!("Habits with periodicity '{periodicity}':");
    for habit in habits {
        println!("- {}: {}", habit.name, habit.description);
    }
}

pub fn print_streaks(summaries: &[HabitStreakSummary]) {
    if summaries.is_empty() {
        println!("No habits found.");
        return;
    }
    for summary in summaries {
        let unit = summary.habit.periodicity.unit_label();
        println!(
            "- {} ({}): longest {} {unit}, current {} {unit}",
            summary.habit.name, summary.habit.periodicity, summary.longest, summary.current
        );
    }
}
