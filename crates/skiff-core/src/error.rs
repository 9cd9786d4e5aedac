//! Error types for skiff-core

use thiserror::Error;

/// Core error type for Skiff
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Invalid bookkeeping table name
    #[error("[E004] Invalid table name '{name}': {reason}")]
    InvalidTableName { name: String, reason: String },

    /// E005: IO error with file path context
    #[error("[E005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E006: Migration source could not be enumerated
    #[error("[E006] Failed to list migrations in {source_name}: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    /// E007: Two migration sources share a version number
    #[error("[E007] Duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: i64,
        first: String,
        second: String,
    },

    /// E008: Identifier requested from a source that does not contain it
    #[error("[E008] Migration '{identifier}' not found in {source_name}")]
    MigrationNotFound {
        identifier: String,
        source_name: String,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
