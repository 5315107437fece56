use chrono::{Duration, NaiveDate};
use habit_core::db::open_db_in_memory;
use habit_core::{HabitService, HabitStore, Periodicity, SqliteHabitStore, StreakLeader};
use rusqlite::Connection;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn service(conn: &Connection) -> HabitService<SqliteHabitStore<'_>> {
    HabitService::new(SqliteHabitStore::try_new(conn).unwrap())
}

fn add_habit(
    service: &HabitService<SqliteHabitStore<'_>>,
    name: &str,
    periodicity: Periodicity,
    dates: &[NaiveDate],
) -> i64 {
    let habit = service
        .create_habit(name, "", periodicity, day(2024, 12, 1))
        .unwrap();
    for date in dates {
        service.mark_completed(habit.id, *date).unwrap();
    }
    habit.id
}

fn consecutive_days(start: NaiveDate, count: i64) -> Vec<NaiveDate> {
    (0..count).map(|offset| start + Duration::days(offset)).collect()
}

fn consecutive_weeks(start: NaiveDate, count: i64) -> Vec<NaiveDate> {
    (0..count).map(|offset| start + Duration::weeks(offset)).collect()
}

#[test]
fn longest_streak_picks_winner_per_periodicity() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let a = add_habit(
        &service,
        "A",
        Periodicity::Daily,
        &consecutive_days(day(2024, 12, 1), 5),
    );
    add_habit(
        &service,
        "B",
        Periodicity::Daily,
        &consecutive_days(day(2024, 12, 10), 2),
    );
    let c = add_habit(
        &service,
        "C",
        Periodicity::Weekly,
        &consecutive_weeks(day(2024, 12, 2), 3),
    );

    let streaks = service.longest_streaks().unwrap();
    assert_eq!(streaks.daily.name, "A");
    assert_eq!(streaks.daily.streak, 5);
    assert_eq!(streaks.daily.habit_id, Some(a));
    assert_eq!(streaks.weekly.name, "C");
    assert_eq!(streaks.weekly.streak, 3);
    assert_eq!(streaks.weekly.habit_id, Some(c));
}

#[test]
fn longest_streak_on_empty_store_reports_sentinels() {
    let conn = open_db_in_memory().unwrap();
    let streaks = service(&conn).longest_streaks().unwrap();

    assert_eq!(streaks.daily, StreakLeader::none());
    assert_eq!(streaks.weekly, StreakLeader::none());
    assert_eq!(streaks.daily.name, "None");
    assert_eq!(streaks.weekly.streak, 0);
}

#[test]
fn longest_streak_with_one_empty_class() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    add_habit(
        &service,
        "Exercise",
        Periodicity::Daily,
        &[day(2024, 12, 10), day(2024, 12, 11)],
    );
    add_habit(&service, "Review Goals", Periodicity::Weekly, &[]);

    let streaks = service.longest_streaks().unwrap();
    assert_eq!(streaks.daily.name, "Exercise");
    assert_eq!(streaks.daily.streak, 2);
    assert!(streaks.weekly.is_none());
}

#[test]
fn weekly_streak_with_one_completion_per_week() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    add_habit(
        &service,
        "Read",
        Periodicity::Weekly,
        &[day(2024, 12, 9), day(2024, 12, 16)],
    );

    let streaks = service.longest_streaks().unwrap();
    assert_eq!(streaks.weekly.name, "Read");
    assert_eq!(streaks.weekly.streak, 2);
}

#[test]
fn ties_go_to_first_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    add_habit(
        &service,
        "Walk",
        Periodicity::Daily,
        &consecutive_days(day(2024, 12, 1), 3),
    );
    add_habit(
        &service,
        "Floss",
        Periodicity::Daily,
        &consecutive_days(day(2024, 12, 10), 3),
    );

    assert_eq!(service.longest_streaks().unwrap().daily.name, "Floss");
}

#[test]
fn recomputation_reflects_new_completions_and_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = add_habit(
        &service,
        "Read",
        Periodicity::Daily,
        &consecutive_days(day(2024, 12, 1), 2),
    );

    let first = service.longest_streaks().unwrap();
    let second = service.longest_streaks().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.daily.streak, 2);

    service.mark_completed(id, day(2024, 12, 3)).unwrap();
    service.mark_completed(id, day(2024, 12, 3)).unwrap();
    assert_eq!(service.longest_streaks().unwrap().daily.streak, 3);
}

#[test]
fn filter_by_periodicity_returns_matching_habits_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    add_habit(&service, "Walk", Periodicity::Daily, &[]);
    add_habit(&service, "Clean House", Periodicity::Weekly, &[]);
    add_habit(&service, "Exercise", Periodicity::Daily, &[]);

    let daily: Vec<String> = service
        .filter_by_periodicity(Periodicity::Daily)
        .unwrap()
        .into_iter()
        .map(|habit| habit.name)
        .collect();
    assert_eq!(daily, vec!["Walk", "Exercise"]);

    let weekly = service.filter_by_periodicity(Periodicity::Weekly).unwrap();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0].name, "Clean House");
}

#[test]
fn streak_summaries_report_longest_and_current() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let today = day(2024, 12, 20);
    add_habit(
        &service,
        "Stale",
        Periodicity::Daily,
        &consecutive_days(day(2024, 12, 1), 6),
    );
    add_habit(
        &service,
        "Active",
        Periodicity::Daily,
        &consecutive_days(day(2024, 12, 18), 3),
    );

    let summaries = service.streak_summaries(today).unwrap();
    let rows: Vec<(&str, u32, u32)> = summaries
        .iter()
        .map(|summary| (summary.habit.name.as_str(), summary.longest, summary.current))
        .collect();
    assert_eq!(rows, vec![("Active", 3, 3), ("Stale", 6, 0)]);

    let single = service.habit_streak("Stale", today).unwrap();
    assert_eq!((single.longest, single.current), (6, 0));
    assert!(service.store().find_habit_by_name("Active").unwrap().is_some());
}
