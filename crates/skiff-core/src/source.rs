//! Migration source providers and discovery.
//!
//! A [`MigrationSource`] only enumerates identifiers and reads statement
//! text. Parsing, ordering, and duplicate detection happen once in
//! [`load_migrations`] so every provider behaves the same way.

use crate::error::{CoreError, CoreResult};
use crate::migration::{parse_identifier, Migration, SQL_EXTENSION};
use std::path::{Path, PathBuf};

/// Something that can enumerate and read migration sources.
pub trait MigrationSource {
    /// Human-readable description for logs and error messages
    fn describe(&self) -> String;

    /// List the identifiers of every candidate migration
    fn identifiers(&self) -> CoreResult<Vec<String>>;

    /// Read the statement text for `identifier`
    fn read(&self, identifier: &str) -> CoreResult<String>;
}

impl<S: MigrationSource + ?Sized> MigrationSource for &S {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn identifiers(&self) -> CoreResult<Vec<String>> {
        (**self).identifiers()
    }

    fn read(&self, identifier: &str) -> CoreResult<String> {
        (**self).read(identifier)
    }
}

/// Load every well-formed migration from `source`, ordered by version.
///
/// Identifiers that do not parse as `<version>_<name>` are skipped without
/// their contents being read. Two migrations sharing a version is an error.
pub fn load_migrations<S: MigrationSource + ?Sized>(source: &S) -> CoreResult<Vec<Migration>> {
    let mut loaded: Vec<(String, Migration)> = Vec::new();

    for identifier in source.identifiers()? {
        let Some((version, name)) = parse_identifier(&identifier) else {
            log::debug!("Skipping '{identifier}': not a <version>_<name> migration");
            continue;
        };
        let sql = source.read(&identifier)?;
        loaded.push((identifier, Migration { version, name, sql }));
    }

    // Stable: equal versions keep listing order.
    loaded.sort_by_key(|(_, m)| m.version);

    if let Some(pair) = loaded
        .windows(2)
        .find(|pair| pair[0].1.version == pair[1].1.version)
    {
        return Err(CoreError::DuplicateVersion {
            version: pair[0].1.version,
            first: pair[0].0.clone(),
            second: pair[1].0.clone(),
        });
    }

    log::debug!(
        "Loaded {} migration(s) from {}",
        loaded.len(),
        source.describe()
    );
    Ok(loaded.into_iter().map(|(_, m)| m).collect())
}

/// Discovers `*.sql` files directly inside a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this source reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn unavailable(&self, message: impl Into<String>) -> CoreError {
        CoreError::SourceUnavailable {
            source_name: self.describe(),
            message: message.into(),
        }
    }
}

impl MigrationSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory '{}'", self.dir.display())
    }

    fn identifiers(&self) -> CoreResult<Vec<String>> {
        if !self.dir.exists() {
            log::warn!(
                "Migrations directory '{}' does not exist",
                self.dir.display()
            );
            return Ok(Vec::new());
        }
        if !self.dir.is_dir() {
            return Err(self.unavailable("not a directory"));
        }

        let escaped = glob::Pattern::escape(&self.dir.to_string_lossy());
        let pattern = Path::new(&escaped).join(format!("*{SQL_EXTENSION}"));
        let paths = glob::glob(&pattern.to_string_lossy())
            .map_err(|e| self.unavailable(format!("invalid glob pattern: {e}")))?;

        let mut identifiers = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| self.unavailable(e.to_string()))?;
            if !path.is_file() {
                continue;
            }
            match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => identifiers.push(name.to_string()),
                None => log::debug!("Skipping non UTF-8 file name: {}", path.display()),
            }
        }
        identifiers.sort();
        Ok(identifiers)
    }

    fn read(&self, identifier: &str) -> CoreResult<String> {
        let path = self.dir.join(identifier);
        std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// An ordered list of `(identifier, sql)` pairs held in memory.
///
/// Suits migrations embedded with `include_str!` as well as tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    entries: Vec<(String, String)>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from `(identifier, sql)` pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append an entry, returning the updated source.
    pub fn with(mut self, identifier: impl Into<String>, sql: impl Into<String>) -> Self {
        self.push(identifier, sql);
        self
    }

    /// Append an entry.
    pub fn push(&mut self, identifier: impl Into<String>, sql: impl Into<String>) {
        self.entries.push((identifier.into(), sql.into()));
    }

    /// Number of entries, including ones that will not parse.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the source has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MigrationSource for InMemorySource {
    fn describe(&self) -> String {
        "in-memory source".to_string()
    }

    fn identifiers(&self) -> CoreResult<Vec<String>> {
        Ok(self.entries.iter().map(|(id, _)| id.clone()).collect())
    }

    fn read(&self, identifier: &str) -> CoreResult<String> {
        self.entries
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, sql)| sql.clone())
            .ok_or_else(|| CoreError::MigrationNotFound {
                identifier: identifier.to_string(),
                source_name: self.describe(),
            })
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
