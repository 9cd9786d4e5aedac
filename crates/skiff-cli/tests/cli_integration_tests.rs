//! CLI integration tests for `skiff run` and `skiff status`
//!
//! Each test builds a throwaway project in a temp directory and drives the
//! compiled binary against it.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the compiled skiff binary (resolved at compile time)
fn skiff_bin() -> String {
    env!("CARGO_BIN_EXE_skiff").to_string()
}

fn new_project(migrations: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let migrations_dir = dir.path().join("migrations");
    fs::create_dir_all(&migrations_dir).unwrap();
    for (file, sql) in migrations {
        fs::write(migrations_dir.join(file), sql).unwrap();
    }
    dir
}

fn skiff(project: &Path, args: &[&str]) -> Output {
    Command::new(skiff_bin())
        .args(args)
        .arg("--project-dir")
        .arg(project)
        .env_remove("SKIFF_DATABASE")
        .env_remove("SKIFF_MIGRATIONS_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run skiff")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ── skiff run ───────────────────────────────────────────────────────────

#[test]
fn test_run_prints_each_migration_and_summary() {
    let project = new_project(&[
        ("2_add_email.sql", "ALTER TABLE users ADD COLUMN email VARCHAR;"),
        ("1_create_users.sql", "CREATE TABLE users (id INTEGER);"),
    ]);

    let output = skiff(project.path(), &["run"]);
    let stdout = stdout_of(&output);

    assert!(
        output.status.success(),
        "run should succeed.\nstdout: {}\nstderr: {}",
        stdout,
        stderr_of(&output)
    );
    assert_eq!(
        stdout,
        "Applied migration 1: create_users\n\
         Applied migration 2: add_email\n\
         Applied 2 migrations successfully\n"
    );
}

#[test]
fn test_second_run_has_nothing_pending() {
    let project = new_project(&[("1_create_users.sql", "CREATE TABLE users (id INTEGER);")]);

    assert!(skiff(project.path(), &["run"]).status.success());
    let output = skiff(project.path(), &["run"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "No pending migrations to apply\n");
}

#[test]
fn test_run_failure_exits_nonzero_with_error_chain() {
    let project = new_project(&[
        ("1_ok.sql", "CREATE TABLE ok (id INTEGER);"),
        ("2_bad.sql", "SELECT * FROM does_not_exist;"),
        ("3_after.sql", "CREATE TABLE after (id INTEGER);"),
    ]);

    let output = skiff(project.path(), &["run"]);
    let stdout = stdout_of(&output);
    let stderr = stderr_of(&output);

    assert!(!output.status.success());
    assert!(stdout.contains("Applied migration 1: ok"), "{}", stdout);
    assert!(!stdout.contains("Applied migration 3"), "{}", stdout);
    assert!(stderr.contains("Migration run failed"), "{}", stderr);
    assert!(stderr.contains("[M004]"), "{}", stderr);
}

#[test]
fn test_run_duplicate_versions_fail_before_executing() {
    let project = new_project(&[
        ("1_first.sql", "CREATE TABLE first (id INTEGER);"),
        ("01_second.sql", "CREATE TABLE second (id INTEGER);"),
    ]);

    let output = skiff(project.path(), &["run"]);
    let stderr = stderr_of(&output);

    assert!(!output.status.success());
    assert!(stderr.contains("[E007]"), "{}", stderr);
    assert!(!stdout_of(&output).contains("Applied migration"));
}

#[test]
fn test_run_missing_migrations_dir_warns_and_succeeds() {
    let project = tempfile::tempdir().unwrap();

    let output = skiff(project.path(), &["run"]);

    assert!(output.status.success(), "{}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "No pending migrations to apply\n");
    assert!(stderr_of(&output).contains("WARN"), "{}", stderr_of(&output));
}

#[test]
fn test_run_respects_database_env_override() {
    let project = new_project(&[("1_t.sql", "CREATE TABLE t (id INTEGER);")]);
    let db_path = project.path().join("from_env.duckdb");

    let output = Command::new(skiff_bin())
        .args(["run", "--project-dir"])
        .arg(project.path())
        .env("SKIFF_DATABASE", &db_path)
        .env_remove("SKIFF_MIGRATIONS_DIR")
        .output()
        .expect("Failed to run skiff");

    assert!(output.status.success(), "{}", stderr_of(&output));
    assert!(db_path.exists());
    assert!(!project.path().join("skiff.duckdb").exists());
}

// ── skiff status ────────────────────────────────────────────────────────

#[test]
fn test_status_table_after_partial_apply() {
    let project = new_project(&[("1_create_users.sql", "CREATE TABLE users (id INTEGER);")]);
    assert!(skiff(project.path(), &["run"]).status.success());
    fs::write(
        project.path().join("migrations").join("2_create_posts.sql"),
        "CREATE TABLE posts (id INTEGER);",
    )
    .unwrap();

    let output = skiff(project.path(), &["status"]);
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "{}", stderr_of(&output));
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("VERSION"));
    assert!(lines[2].contains("create_users") && lines[2].contains("applied"));
    assert!(lines[3].contains("create_posts") && lines[3].contains("pending"));
    assert!(stdout.contains("2 migrations, 1 pending"), "{}", stdout);
}

#[test]
fn test_status_json_reports_states() {
    let project = new_project(&[("1_create_users.sql", "CREATE TABLE users (id INTEGER);")]);
    assert!(skiff(project.path(), &["run"]).status.success());
    fs::remove_file(project.path().join("migrations").join("1_create_users.sql")).unwrap();
    fs::write(
        project.path().join("migrations").join("5_later.sql"),
        "SELECT 1;",
    )
    .unwrap();

    let output = skiff(project.path(), &["status", "--output", "json"]);
    assert!(output.status.success(), "{}", stderr_of(&output));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["version"], 1);
    assert_eq!(entries[0]["state"], "missing");
    assert!(entries[0]["applied_at"].is_string());
    assert_eq!(entries[1]["version"], 5);
    assert_eq!(entries[1]["name"], "later");
    assert_eq!(entries[1]["state"], "pending");
}
