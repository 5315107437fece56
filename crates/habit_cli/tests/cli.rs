use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const TODAY: &str = "2024-01-10";

struct CliTestEnv {
    _temp_dir: TempDir,
    db: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db = temp_dir.path().join("habits.db");
        Self {
            _temp_dir: temp_dir,
            db,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        run_bin(&self.db, args)
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_success(args, &output);
        String::from_utf8(output.stdout).expect("stdout is not utf-8")
    }
}

fn run_bin(db: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(assert_cmd::cargo::cargo_bin!("habits"));

    command
        .arg("--db")
        .arg(db)
        .args(["--today", TODAY])
        .args(args)
        .env_remove("HABITS_DB")
        .env_remove("HABITS_LOG_DIR")
        .env_remove("HABITS_LOG_LEVEL")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute habits: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    assert!(
        output.status.success(),
        "habits {:?} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        args,
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn create_then_list_shows_never_completed() {
    let env = CliTestEnv::new();

    let created = env.run_ok(&[
        "create",
        "Read",
        "--description",
        "Read 20 pages",
        "--periodicity",
        "daily",
    ]);
    assert!(created.contains("Habit 'Read' created successfully."));

    let listed = env.run_ok(&["list"]);
    assert!(listed.contains("- Read (daily)"));
    assert!(listed.contains("  Description: Read 20 pages"));
    assert!(listed.contains("  Last Completed: Never"));
}

#[test]
fn duplicate_create_fails() {
    let env = CliTestEnv::new();
    env.run_ok(&["create", "Read", "--periodicity", "daily"]);

    let output = env.run(&["create", "Read", "--periodicity", "weekly"]);
    assert!(!output.status.success());
}

#[test]
fn completions_drive_status_and_longest_streak() {
    let env = CliTestEnv::new();
    env.run_ok(&["create", "Read", "--periodicity", "daily"]);
    env.run_ok(&["create", "Gym", "--periodicity", "weekly"]);

    for date in ["2024-01-08", "2024-01-09", "2024-01-10"] {
        let out = env.run_ok(&["complete", "Read", "--date", date]);
        assert!(out.contains(&format!("Habit 'Read' marked as completed on {date}.")));
    }
    let again = env.run_ok(&["complete", "Read"]);
    assert!(again.contains("Habit 'Read' is already marked as completed on 2024-01-10."));

    let status = env.run_ok(&["status"]);
    assert!(status.contains("- Read (daily / Last Completed: 2024-01-10)"));
    assert!(status.contains("- Gym (weekly / Last Completed: Never)"));

    let longest = env.run_ok(&["longest"]);
    assert!(longest.contains("The longest daily streak is: 3 days on habit: Read."));
    assert!(longest.contains("The longest weekly streak is: 0 weeks on habit: None."));
}

#[test]
fn complete_by_pick_uses_pending_order() {
    let env = CliTestEnv::new();
    env.run_ok(&["create", "Read", "--periodicity", "daily"]);
    env.run_ok(&["create", "Walk", "--periodicity", "daily"]);

    let pending = env.run_ok(&["pending"]);
    assert!(pending.contains("1. Read (daily, Last Completed: Never)"));
    assert!(pending.contains("2. Walk (daily, Last Completed: Never)"));

    let out = env.run_ok(&["complete", "--pick", "2"]);
    assert!(out.contains("Habit 'Walk' marked as completed on 2024-01-10."));

    let out_of_range = env.run(&["complete", "--pick", "5"]);
    assert!(!out_of_range.status.success());
}

#[test]
fn pending_json_is_machine_readable() {
    let env = CliTestEnv::new();
    env.run_ok(&["create", "Read", "--periodicity", "daily"]);

    let raw = env.run_ok(&["pending", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&raw).expect("invalid json");
    let entries = value.as_array().expect("expected array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Read");
    assert_eq!(entries[0]["periodicity"], "daily");
}

#[test]
fn malformed_date_is_rejected_before_touching_the_store() {
    let env = CliTestEnv::new();
    env.run_ok(&["create", "Read", "--periodicity", "daily"]);

    let output = env.run(&["complete", "Read", "--date", "2024/01/10"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("YYYY-MM-DD"), "stderr: {stderr}");

    let listed = env.run_ok(&["list"]);
    assert!(listed.contains("Last Completed: Never"));
}

#[test]
fn edit_and_delete_by_name() {
    let env = CliTestEnv::new();
    env.run_ok(&["create", "Read", "--periodicity", "daily"]);

    let edited = env.run_ok(&["edit", "Read", "--name", "Study", "--periodicity", "weekly"]);
    assert!(edited.contains("Habit 'Read' was successfully updated."));

    let filtered = env.run_ok(&["filter", "weekly"]);
    assert!(filtered.contains("Habits with periodicity 'weekly':"));
    assert!(filtered.contains("- Study:"));

    let deleted = env.run_ok(&["delete", "Study"]);
    assert!(deleted.contains("Habit 'Study' was deleted successfully."));
    assert!(env.run_ok(&["list"]).contains("No habits found."));

    let missing = env.run(&["delete", "Study"]);
    assert!(!missing.status.success());
}

#[test]
fn rebuild_requires_confirmation() {
    let env = CliTestEnv::new();
    env.run_ok(&["create", "Read", "--periodicity", "daily"]);

    let refused = env.run(&["rebuild"]);
    assert!(!refused.status.success());
    assert!(env.run_ok(&["list"]).contains("- Read (daily)"));

    env.run_ok(&["rebuild", "--yes"]);
    assert!(env.run_ok(&["list"]).contains("No habits found."));
}

#[test]
fn seed_populates_both_periodicities() {
    let env = CliTestEnv::new();
    let out = env.run_ok(&["seed"]);
    assert!(out.contains("Database seeded successfully with test data"));

    let longest = env.run_ok(&["longest"]);
    assert!(longest.contains("The longest daily streak is: 28 days"));
    assert!(longest.contains("The longest weekly streak is: 4 weeks"));
}
