//! Validated name of the bookkeeping table.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Default bookkeeping table name.
pub const DEFAULT_TABLE_NAME: &str = "migrations";

/// Name of the bookkeeping table, optionally schema-qualified (`schema.table`).
///
/// The name is interpolated into DDL, so each part is restricted to an
/// unquoted SQL identifier: ASCII letters, digits, and underscores, not
/// starting with a digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Parse and validate a table name.
    pub fn parse(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        let invalid = |reason: &str| CoreError::InvalidTableName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() > 2 {
            return Err(invalid("at most one schema qualifier is allowed"));
        }
        for part in &parts {
            if part.is_empty() {
                return Err(invalid("name parts cannot be empty"));
            }
            if part.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(invalid("name parts cannot start with a digit"));
            }
            if !part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid(
                    "only ASCII letters, digits, and underscores are allowed",
                ));
            }
        }
        Ok(Self(name))
    }

    /// Schema qualifier, if any.
    pub fn schema(&self) -> Option<&str> {
        self.0.split_once('.').map(|(schema, _)| schema)
    }

    /// Unqualified table part.
    pub fn table(&self) -> &str {
        self.0
            .split_once('.')
            .map_or(self.0.as_str(), |(_, table)| table)
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE_NAME.to_string())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for TableName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TableName {
    type Error = CoreError;

    fn try_from(s: String) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for TableName {
    type Error = CoreError;

    fn try_from(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl From<TableName> for String {
    fn from(name: TableName) -> Self {
        name.0
    }
}

impl PartialEq<&str> for TableName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
