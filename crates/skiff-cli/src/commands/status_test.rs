use super::*;
use chrono::NaiveDate;
use std::fs;
use tempfile::tempdir;

fn at(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn test_format_table_empty() {
    assert_eq!(format_table(&[]), "No migrations found\n");
}

#[test]
fn test_format_table_rows_and_footer() {
    let statuses = vec![
        MigrationStatus {
            version: 1,
            name: "create_users".to_string(),
            state: MigrationState::Applied {
                applied_at: at(9, 30, 0),
            },
        },
        MigrationStatus {
            version: 2,
            name: "dropped".to_string(),
            state: MigrationState::Missing {
                applied_at: at(9, 31, 5),
            },
        },
        MigrationStatus {
            version: 3,
            name: "add_index".to_string(),
            state: MigrationState::Pending,
        },
    ];

    let table = format_table(&statuses);
    let lines: Vec<&str> = table.lines().collect();

    assert!(lines[0].starts_with("VERSION  NAME"));
    assert!(lines[0].ends_with("APPLIED_AT"));
    assert!(lines[1].starts_with("-------  "));
    assert!(lines[2].starts_with("1        create_users  applied"));
    assert!(lines[2].ends_with("2024-03-01 09:30:00"));
    assert!(lines[3].contains("missing"));
    assert!(lines[4].contains("pending"));
    assert!(lines[4].trim_end().ends_with('-'));
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "3 migrations, 1 pending");
}

#[test]
fn test_status_on_fresh_project_succeeds() {
    let temp_dir = tempdir().unwrap();
    let project = temp_dir.path();
    let dir = project.join("migrations");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("1_init.sql"), "CREATE TABLE t (id INTEGER);").unwrap();

    let global = GlobalArgs {
        verbose: false,
        project_dir: project.display().to_string(),
        config: None,
        database: None,
        migrations_dir: None,
    };
    let args = StatusArgs {
        output: StatusOutput::Json,
    };
    execute(&args, &global).unwrap();

    // status creates bookkeeping but applies nothing
    let db = skiff_db::DuckDbBackend::from_path(&project.join("skiff.duckdb")).unwrap();
    let rows = skiff_db::Database::query_rows(&db, "SELECT count(*) FROM migrations").unwrap();
    assert_eq!(rows[0][0].as_i64(), Some(0));
}
