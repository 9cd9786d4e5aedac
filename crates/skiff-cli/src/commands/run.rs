//! Run command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{build_migrator, load_settings, open_database};

/// Execute the run command
pub(crate) fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global)?;
    let db = open_database(&settings)?;

    let mut migrator = build_migrator(&db, &settings);
    if args.no_transaction {
        migrator = migrator.with_atomic(false);
    }

    if global.verbose {
        eprintln!(
            "[verbose] Project {}: {} -> {} (table {})",
            settings.root.display(),
            settings.migrations_dir.display(),
            settings.database_path,
            migrator.table()
        );
    }

    let summary = migrator
        .run_with(|migration| {
            println!("Applied migration {}: {}", migration.version, migration.name);
        })
        .context("Migration run failed")?;

    println!("{}", summary_line(summary.count()));
    Ok(())
}

/// Final line printed after a successful run
pub(crate) fn summary_line(count: usize) -> String {
    match count {
        0 => "No pending migrations to apply".to_string(),
        1 => "Applied 1 migration successfully".to_string(),
        n => format!("Applied {} migrations successfully", n),
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
