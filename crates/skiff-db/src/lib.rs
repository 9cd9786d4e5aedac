//! skiff-db - Database abstraction layer for Skiff
//!
//! This crate provides the `Database` trait the migration applier runs
//! against, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub(crate) mod row_helpers;
pub mod traits;

pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{with_transaction, Database, Row, SqlValue};
