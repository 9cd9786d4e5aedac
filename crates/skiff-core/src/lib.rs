//! skiff-core - Core library for Skiff
//!
//! This crate provides the migration data model, identifier parsing,
//! migration source providers, and configuration parsing shared by the
//! other Skiff crates.

pub mod config;
pub mod error;
pub mod migration;
pub mod source;
pub mod table_name;

pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
pub use migration::{parse_identifier, AppliedRecord, Migration};
pub use source::{load_migrations, DirectorySource, InMemorySource, MigrationSource};
pub use table_name::TableName;
