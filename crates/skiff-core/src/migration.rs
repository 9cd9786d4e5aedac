//! Migration definitions and identifier parsing.
//!
//! A migration source is identified by a string of the form
//! `<version>_<name>.sql` (for example `001_add_starred_column.sql`). The
//! version is the run of ASCII digits before the first `_`; everything after
//! it, minus the `.sql` extension, is the name.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// File extension stripped from migration names.
pub const SQL_EXTENSION: &str = ".sql";

/// A single versioned schema change loaded from a migration source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Migration {
    /// Version parsed from the identifier prefix.
    pub version: i64,
    /// Descriptive label parsed from the identifier remainder.
    pub name: String,
    /// Raw statement text executed when the migration is applied.
    #[serde(skip)]
    pub sql: String,
}

impl Migration {
    /// Build a migration from a source identifier and its statement text.
    ///
    /// Returns `None` when the identifier does not follow the
    /// `<version>_<name>` pattern.
    pub fn from_source(identifier: &str, sql: impl Into<String>) -> Option<Self> {
        let (version, name) = parse_identifier(identifier)?;
        Some(Self {
            version,
            name,
            sql: sql.into(),
        })
    }
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.name)
    }
}

/// A row of the bookkeeping table: one successfully applied migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: NaiveDateTime,
}

/// Split a migration identifier into `(version, name)`.
///
/// The version must be a non-empty run of ASCII digits that fits in an
/// `i64`. Signs, whitespace, and overflowing prefixes are rejected.
pub fn parse_identifier(identifier: &str) -> Option<(i64, String)> {
    let (prefix, rest) = identifier.split_once('_')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let version = prefix.parse::<i64>().ok()?;
    let name = rest.strip_suffix(SQL_EXTENSION).unwrap_or(rest);
    Some((version, name.to_string()))
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
