//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use skiff_core::{Config, DirectorySource};
use skiff_db::DuckDbBackend;
use skiff_migrate::Migrator;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Effective settings after merging config file, flags, and environment.
#[derive(Debug)]
pub(crate) struct Settings {
    pub root: PathBuf,
    pub config: Config,
    pub database_path: String,
    pub migrations_dir: PathBuf,
}

/// Resolve settings for a command.
///
/// An explicit `--config` must exist. Without one, `skiff.yml`/`skiff.yaml`
/// in the project directory is used when present, defaults otherwise.
pub(crate) fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    let root = PathBuf::from(&global.project_dir);

    let config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => match Config::find_in_dir(&root) {
            Some(path) => Config::load(&path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => {
                log::debug!(
                    "No config file in {}, using defaults",
                    root.display()
                );
                Config::default()
            }
        },
    };

    let database_path = global
        .database
        .clone()
        .unwrap_or_else(|| config.database_path_resolved(&root));
    let migrations_dir = global
        .migrations_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.migrations_dir_absolute(&root));

    Ok(Settings {
        root,
        config,
        database_path,
        migrations_dir,
    })
}

/// Open the configured database
pub(crate) fn open_database(settings: &Settings) -> Result<DuckDbBackend> {
    log::debug!("Opening database: {}", settings.database_path);
    DuckDbBackend::new(&settings.database_path)
        .with_context(|| format!("Failed to open database: {}", settings.database_path))
}

/// Build a migrator over the configured migrations directory
pub(crate) fn build_migrator<'db>(
    db: &'db DuckDbBackend,
    settings: &Settings,
) -> Migrator<'db, DuckDbBackend, DirectorySource> {
    Migrator::new(db, DirectorySource::new(&settings.migrations_dir))
        .with_table(settings.config.table.clone())
        .with_atomic(settings.config.atomic)
}
