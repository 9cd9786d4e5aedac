//! Migration applier for Skiff.
//!
//! Ensures the bookkeeping table exists, works out which migrations are
//! pending, and applies them one at a time in ascending version order,
//! recording each success in the bookkeeping table.

pub mod applier;
pub mod bookkeeping;
pub mod error;
pub mod status;

pub use applier::{Migrator, RunSummary};
pub use error::{MigrateError, MigrateResult};
pub use status::{MigrationState, MigrationStatus};
