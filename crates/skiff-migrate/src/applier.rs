//! The migration applier.
//!
//! [`Migrator`] borrows a caller-owned [`Database`] and owns a
//! [`MigrationSource`]. A run initializes bookkeeping, reads the applied
//! set, loads every migration, and applies the pending ones strictly in
//! ascending version order, stopping at the first failure.

use crate::bookkeeping;
use crate::error::{MigrateError, MigrateResult};
use crate::status::{merge_status, MigrationStatus};
use skiff_core::{load_migrations, AppliedRecord, Migration, MigrationSource, TableName};
use skiff_db::{with_transaction, Database, DbError};
use std::collections::BTreeSet;

/// Migrations applied by a single run, in application order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub applied: Vec<Migration>,
}

impl RunSummary {
    /// Number of migrations applied.
    pub fn count(&self) -> usize {
        self.applied.len()
    }

    /// True when the run found nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Applied versions, in application order.
    pub fn versions(&self) -> Vec<i64> {
        self.applied.iter().map(|m| m.version).collect()
    }
}

/// Which half of apply-one failed.
enum ApplyFailure {
    Execute(DbError),
    Record(DbError),
    Transaction(DbError),
}

impl From<DbError> for ApplyFailure {
    fn from(err: DbError) -> Self {
        ApplyFailure::Transaction(err)
    }
}

impl ApplyFailure {
    fn into_error(self, migration: &Migration) -> MigrateError {
        let version = migration.version;
        let name = migration.name.clone();
        match self {
            ApplyFailure::Execute(source) => MigrateError::ExecutionFailed {
                version,
                name,
                source,
            },
            ApplyFailure::Record(source) => MigrateError::RecordFailed {
                version,
                name,
                source,
            },
            ApplyFailure::Transaction(source) => MigrateError::TransactionFailed {
                version,
                name,
                source,
            },
        }
    }
}

/// Applies pending migrations from a source against a database.
pub struct Migrator<'db, D: Database + ?Sized, S: MigrationSource> {
    db: &'db D,
    source: S,
    table: TableName,
    atomic: bool,
}

impl<'db, D, S> Migrator<'db, D, S>
where
    D: Database + ?Sized,
    S: MigrationSource,
{
    /// Create a migrator using the default `migrations` table in atomic mode.
    pub fn new(db: &'db D, source: S) -> Self {
        Self {
            db,
            source,
            table: TableName::default(),
            atomic: true,
        }
    }

    /// Use `table` as the bookkeeping table.
    pub fn with_table(mut self, table: TableName) -> Self {
        self.table = table;
        self
    }

    /// Choose whether body and bookkeeping insert share one transaction.
    ///
    /// With `atomic` off, a failed insert leaves the body's effects in place
    /// and the migration is applied again on the next run.
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Bookkeeping table in use.
    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Idempotently create the bookkeeping table.
    pub fn init(&self) -> MigrateResult<()> {
        bookkeeping::ensure_table(self.db, &self.table).map_err(|source| {
            MigrateError::BookkeepingInit {
                table: self.table.to_string(),
                source,
            }
        })
    }

    /// Versions already recorded as applied.
    pub fn applied_versions(&self) -> MigrateResult<BTreeSet<i64>> {
        bookkeeping::applied_versions(self.db, &self.table).map_err(|source| {
            MigrateError::AppliedQuery {
                table: self.table.to_string(),
                source,
            }
        })
    }

    /// Every applied record, ordered by version.
    pub fn applied_records(&self) -> MigrateResult<Vec<AppliedRecord>> {
        bookkeeping::applied_records(self.db, &self.table).map_err(|source| {
            MigrateError::AppliedQuery {
                table: self.table.to_string(),
                source,
            }
        })
    }

    /// Load every migration from the source, ordered by version.
    pub fn load(&self) -> MigrateResult<Vec<Migration>> {
        Ok(load_migrations(&self.source)?)
    }

    /// Execute `migration` and record it as applied.
    pub fn apply_one(&self, migration: &Migration) -> MigrateResult<()> {
        log::debug!(
            "Applying migration {} ({}) on {}",
            migration.version,
            migration.name,
            self.db.db_type()
        );

        let outcome = if self.atomic {
            with_transaction(self.db, |db| {
                execute_and_record(db, &self.table, migration)
            })
        } else {
            execute_and_record(self.db, &self.table, migration)
        };
        outcome.map_err(|failure| failure.into_error(migration))?;

        log::info!(
            "Applied migration {}: {}",
            migration.version,
            migration.name
        );
        Ok(())
    }

    /// Apply every pending migration in ascending version order.
    pub fn run(&self) -> MigrateResult<RunSummary> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `on_applied` after each migration
    /// is applied and recorded.
    pub fn run_with<F>(&self, mut on_applied: F) -> MigrateResult<RunSummary>
    where
        F: FnMut(&Migration),
    {
        self.init()?;
        let applied = self.applied_versions()?;
        let migrations = self.load()?;

        let mut summary = RunSummary::default();
        for migration in migrations {
            if applied.contains(&migration.version) {
                log::debug!("Skipping applied migration {}", migration.version);
                continue;
            }
            self.apply_one(&migration)?;
            on_applied(&migration);
            summary.applied.push(migration);
        }

        if summary.is_empty() {
            log::info!("No pending migrations to apply");
        } else {
            log::info!("Applied {} migration(s)", summary.count());
        }
        Ok(summary)
    }

    /// Migrations not yet recorded, in the order a run would apply them.
    pub fn pending(&self) -> MigrateResult<Vec<Migration>> {
        self.init()?;
        let applied = self.applied_versions()?;
        Ok(self
            .load()?
            .into_iter()
            .filter(|m| !applied.contains(&m.version))
            .collect())
    }

    /// Applied, pending, and missing migrations ordered by version.
    pub fn status(&self) -> MigrateResult<Vec<MigrationStatus>> {
        self.init()?;
        let records = self.applied_records()?;
        let migrations = self.load()?;
        Ok(merge_status(migrations, records))
    }
}

fn execute_and_record<D: Database + ?Sized>(
    db: &D,
    table: &TableName,
    migration: &Migration,
) -> Result<(), ApplyFailure> {
    db.execute_batch(&migration.sql)
        .map_err(ApplyFailure::Execute)?;
    bookkeeping::insert_record(db, table, migration).map_err(ApplyFailure::Record)
}

#[cfg(test)]
#[path = "applier_test.rs"]
mod tests;
