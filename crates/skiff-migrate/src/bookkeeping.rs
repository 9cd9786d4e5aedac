//! Bookkeeping table access.
//!
//! The table holds one row per successfully applied migration:
//!
//! ```sql
//! version    BIGINT    PRIMARY KEY
//! name       VARCHAR   NOT NULL
//! applied_at TIMESTAMP NOT NULL DEFAULT now()
//! ```
//!
//! Rows are only ever inserted.

use chrono::NaiveDateTime;
use skiff_core::{AppliedRecord, Migration, TableName};
use skiff_db::{Database, DbError, DbResult, SqlValue};
use std::collections::BTreeSet;

/// Format DuckDB uses when casting a `TIMESTAMP` to `VARCHAR`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Create the bookkeeping table (and its schema, if qualified) when missing.
pub fn ensure_table<D: Database + ?Sized>(db: &D, table: &TableName) -> DbResult<()> {
    let mut sql = String::new();
    if let Some(schema) = table.schema() {
        sql.push_str(&format!("CREATE SCHEMA IF NOT EXISTS {schema};\n"));
    }
    sql.push_str(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
             version    BIGINT PRIMARY KEY,
             name       VARCHAR NOT NULL,
             applied_at TIMESTAMP NOT NULL DEFAULT now()
         );"
    ));
    db.execute_batch(&sql)
}

/// Versions already recorded as applied.
pub fn applied_versions<D: Database + ?Sized>(
    db: &D,
    table: &TableName,
) -> DbResult<BTreeSet<i64>> {
    let rows = db.query_rows(&format!("SELECT version FROM {table} ORDER BY version"))?;
    rows.iter().map(|row| integer_column(row, 0)).collect()
}

/// Every applied record, ordered by version.
pub fn applied_records<D: Database + ?Sized>(
    db: &D,
    table: &TableName,
) -> DbResult<Vec<AppliedRecord>> {
    let rows = db.query_rows(&format!(
        "SELECT version, name, CAST(applied_at AS VARCHAR) FROM {table} ORDER BY version"
    ))?;

    rows.iter()
        .map(|row| -> DbResult<AppliedRecord> {
            let applied_at = text_column(row, 2)?;
            Ok(AppliedRecord {
                version: integer_column(row, 0)?,
                name: text_column(row, 1)?.to_string(),
                applied_at: NaiveDateTime::parse_from_str(applied_at, TIMESTAMP_FORMAT)
                    .map_err(|e| DbError::UnexpectedValue {
                        column: 2,
                        message: format!("invalid timestamp '{applied_at}': {e}"),
                    })?,
            })
        })
        .collect()
}

/// Record `migration` as applied. `applied_at` takes the column default.
pub fn insert_record<D: Database + ?Sized>(
    db: &D,
    table: &TableName,
    migration: &Migration,
) -> DbResult<()> {
    db.execute(
        &format!("INSERT INTO {table} (version, name) VALUES (?, ?)"),
        &[
            SqlValue::from(migration.version),
            SqlValue::from(migration.name.as_str()),
        ],
    )?;
    Ok(())
}

fn integer_column(row: &[SqlValue], idx: usize) -> DbResult<i64> {
    row.get(idx)
        .and_then(SqlValue::as_i64)
        .ok_or_else(|| DbError::UnexpectedValue {
            column: idx,
            message: format!("expected integer, found {:?}", row.get(idx)),
        })
}

fn text_column(row: &[SqlValue], idx: usize) -> DbResult<&str> {
    row.get(idx)
        .and_then(SqlValue::as_str)
        .ok_or_else(|| DbError::UnexpectedValue {
            column: idx,
            message: format!("expected text, found {:?}", row.get(idx)),
        })
}

#[cfg(test)]
#[path = "bookkeeping_test.rs"]
mod tests;
