use super::*;

#[test]
fn test_parse_identifier_basic() {
    assert_eq!(
        parse_identifier("001_add_starred_column.sql"),
        Some((1, "add_starred_column".to_string()))
    );
}

#[test]
fn test_parse_identifier_splits_on_first_separator() {
    assert_eq!(
        parse_identifier("42_create_users_table.sql"),
        Some((42, "create_users_table".to_string()))
    );
}

#[test]
fn test_parse_identifier_without_extension() {
    assert_eq!(
        parse_identifier("7_seed_lookup"),
        Some((7, "seed_lookup".to_string()))
    );
}

#[test]
fn test_parse_identifier_zero_version() {
    assert_eq!(parse_identifier("0_bootstrap.sql"), Some((0, "bootstrap".to_string())));
}

#[test]
fn test_parse_identifier_empty_name() {
    assert_eq!(parse_identifier("003_.sql"), Some((3, String::new())));
}

#[test]
fn test_parse_identifier_rejects_missing_separator() {
    assert_eq!(parse_identifier("001.sql"), None);
    assert_eq!(parse_identifier("README"), None);
}

#[test]
fn test_parse_identifier_rejects_non_integer_prefix() {
    assert_eq!(parse_identifier("abc_init.sql"), None);
    assert_eq!(parse_identifier("v1_init.sql"), None);
    assert_eq!(parse_identifier("1a_init.sql"), None);
    assert_eq!(parse_identifier("_init.sql"), None);
}

#[test]
fn test_parse_identifier_rejects_signs() {
    assert_eq!(parse_identifier("-1_init.sql"), None);
    assert_eq!(parse_identifier("+1_init.sql"), None);
}

#[test]
fn test_parse_identifier_rejects_overflow() {
    assert_eq!(parse_identifier("99999999999999999999_huge.sql"), None);
}

#[test]
fn test_migration_from_source() {
    let m = Migration::from_source("002_add_index.sql", "CREATE INDEX i ON t(a);").unwrap();
    assert_eq!(m.version, 2);
    assert_eq!(m.name, "add_index");
    assert_eq!(m.sql, "CREATE INDEX i ON t(a);");
    assert_eq!(m.to_string(), "2 (add_index)");
}

#[test]
fn test_migration_from_source_malformed() {
    assert!(Migration::from_source("notes.sql", "SELECT 1").is_none());
}
