use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.database.path, "skiff.duckdb");
    assert_eq!(config.migrations_dir, "migrations");
    assert_eq!(config.table, "migrations");
    assert!(config.atomic);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
database:
  path: "./app.duckdb"
migrations_dir: db/migrations
table: ops.schema_history
atomic: false
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.database.path, "./app.duckdb");
    assert_eq!(config.migrations_dir, "db/migrations");
    assert_eq!(config.table.schema(), Some("ops"));
    assert_eq!(config.table.table(), "schema_history");
    assert!(!config.atomic);
}

#[test]
fn test_parse_rejects_unknown_fields() {
    let result: Result<Config, _> = serde_yaml::from_str("migration_dir: typo");
    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_invalid_table_name() {
    let result: Result<Config, _> = serde_yaml::from_str("table: \"bad name\"");
    assert!(result.is_err());
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = Config::load(&dir.path().join("skiff.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("skiff.yml"), "migrations_dir: from_yml").unwrap();
    fs::write(dir.path().join("skiff.yaml"), "migrations_dir: from_yaml").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "from_yml");
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("skiff.yaml"), "table: history").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.table, "history");
}

#[test]
fn test_load_from_dir_not_found() {
    let dir = tempdir().unwrap();
    assert!(Config::find_in_dir(dir.path()).is_none());
    assert!(matches!(
        Config::load_from_dir(dir.path()),
        Err(CoreError::ConfigNotFound { .. })
    ));
}

#[test]
fn test_load_rejects_empty_migrations_dir() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("skiff.yml"), "migrations_dir: \"\"").unwrap();

    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_load_reports_parse_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("skiff.yml"), "atomic: [not, a, bool]").unwrap();

    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParse(_)));
}

#[test]
fn test_path_resolution() {
    let root = PathBuf::from("/srv/app");
    let mut config = Config::default();

    assert_eq!(
        config.migrations_dir_absolute(&root),
        root.join("migrations")
    );
    assert_eq!(
        config.database_path_resolved(&root),
        root.join("skiff.duckdb").display().to_string()
    );

    config.database.path = MEMORY_DATABASE.to_string();
    assert_eq!(config.database_path_resolved(&root), ":memory:");

    config.database.path = "/var/lib/app.duckdb".to_string();
    assert_eq!(config.database_path_resolved(&root), "/var/lib/app.duckdb");
}
