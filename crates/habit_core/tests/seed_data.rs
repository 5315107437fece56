use chrono::NaiveDate;
use habit_core::db::open_db_in_memory;
use habit_core::{seed_demo_data, HabitService, Periodicity, SqliteHabitStore};

#[test]
fn seeding_creates_demo_habits_with_full_streaks() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteHabitStore::try_new(&conn).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();

    let report = seed_demo_data(&store, today).unwrap();
    assert_eq!(report.habits_created, 10);
    assert!(report.completions_recorded >= 5 * 28 + 5 * 4);

    let service = HabitService::new(store);
    assert_eq!(service.filter_by_periodicity(Periodicity::Daily).unwrap().len(), 5);
    assert_eq!(service.filter_by_periodicity(Periodicity::Weekly).unwrap().len(), 5);

    let streaks = service.longest_streaks().unwrap();
    assert_eq!(streaks.daily.streak, 28);
    assert_eq!(streaks.weekly.streak, 4);

    let pending = service.pending_habits(today).unwrap();
    assert!(pending.is_empty());
}

#[test]
fn seeding_twice_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteHabitStore::try_new(&conn).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();

    seed_demo_data(&store, today).unwrap();
    let second = seed_demo_data(&store, today).unwrap();
    assert_eq!(second.habits_created, 0);
    assert_eq!(second.completions_recorded, 0);
}
