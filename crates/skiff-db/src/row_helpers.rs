//! Helpers for reading DuckDB rows into [`SqlValue`]s.

use crate::error::{DbError, DbResult};
use crate::traits::{Row, SqlValue};
use duckdb::types::ValueRef;

/// Read a column as a [`SqlValue`].
///
/// Integer types narrower than or equal to `i64` map to `Integer`, text maps
/// to `Text`. Anything else should be cast in SQL before it reaches here.
pub(crate) fn get_column_value(row: &duckdb::Row<'_>, idx: usize) -> DbResult<SqlValue> {
    let value = row.get_ref(idx).map_err(|e| DbError::UnexpectedValue {
        column: idx,
        message: e.to_string(),
    })?;

    let out_of_range = |v: String| DbError::UnexpectedValue {
        column: idx,
        message: format!("integer {v} does not fit in i64"),
    };

    Ok(match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Boolean(b) => SqlValue::Integer(i64::from(b)),
        ValueRef::TinyInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::SmallInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::Int(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::BigInt(n) => SqlValue::Integer(n),
        ValueRef::UTinyInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::USmallInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::UInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::UBigInt(n) => {
            SqlValue::Integer(i64::try_from(n).map_err(|_| out_of_range(n.to_string()))?)
        }
        ValueRef::HugeInt(n) => {
            SqlValue::Integer(i64::try_from(n).map_err(|_| out_of_range(n.to_string()))?)
        }
        ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        other => {
            return Err(DbError::UnexpectedValue {
                column: idx,
                message: format!("unsupported type {other:?}; cast to VARCHAR or BIGINT"),
            })
        }
    })
}

/// Execute a prepared statement and collect every row.
///
/// DuckDB panics on `stmt.column_count()` before execution, so the column
/// count is read from each row instead.
pub(crate) fn collect_rows(stmt: &mut duckdb::Statement<'_>) -> DbResult<Vec<Row>> {
    let raw_rows: Vec<Vec<DbResult<SqlValue>>> = stmt
        .query_map([], |row| {
            let col_count = row.as_ref().column_count();
            Ok((0..col_count)
                .map(|i| get_column_value(row, i))
                .collect())
        })
        .map_err(|e| DbError::ExecutionError(format!("query failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DbError::ExecutionError(format!("row error: {e}")))?;

    raw_rows
        .into_iter()
        .map(|row| row.into_iter().collect::<DbResult<Row>>())
        .collect()
}
