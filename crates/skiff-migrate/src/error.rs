//! Error types for the migration applier.

use skiff_core::CoreError;
use skiff_db::DbError;
use thiserror::Error;

/// Migration applier errors.
///
/// None of these are retried. Migrations applied before the failing one stay
/// committed.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The bookkeeping table could not be created (M001).
    #[error("[M001] Failed to initialize bookkeeping table '{table}': {source}")]
    BookkeepingInit { table: String, source: DbError },

    /// Applied versions could not be read (M002).
    #[error("[M002] Failed to read applied migrations from '{table}': {source}")]
    AppliedQuery { table: String, source: DbError },

    /// Migration sources could not be loaded (M003).
    #[error("[M003] Failed to load migrations: {0}")]
    SourceLoad(#[from] CoreError),

    /// A migration body failed to execute (M004).
    #[error("[M004] Failed to apply migration {version} ({name}): {source}")]
    ExecutionFailed {
        version: i64,
        name: String,
        source: DbError,
    },

    /// The bookkeeping insert failed after the body executed (M005).
    ///
    /// The migration is not recorded and will be applied again next run.
    #[error("[M005] Failed to record migration {version} ({name}): {source}")]
    RecordFailed {
        version: i64,
        name: String,
        source: DbError,
    },

    /// Opening or committing the per-migration transaction failed (M006).
    #[error("[M006] Transaction failed for migration {version} ({name}): {source}")]
    TransactionFailed {
        version: i64,
        name: String,
        source: DbError,
    },
}

impl MigrateError {
    /// Version of the migration the error concerns, if any.
    pub fn version(&self) -> Option<i64> {
        match self {
            MigrateError::ExecutionFailed { version, .. }
            | MigrateError::RecordFailed { version, .. }
            | MigrateError::TransactionFailed { version, .. } => Some(*version),
            _ => None,
        }
    }
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
