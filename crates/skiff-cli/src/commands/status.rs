//! Status command implementation

use anyhow::{Context, Result};
use skiff_migrate::{MigrationState, MigrationStatus};

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{build_migrator, load_settings, open_database};

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global)?;
    let db = open_database(&settings)?;
    let migrator = build_migrator(&db, &settings);

    let statuses = migrator
        .status()
        .context("Failed to read migration status")?;

    match args.output {
        StatusOutput::Table => print!("{}", format_table(&statuses)),
        StatusOutput::Json => {
            let json = serde_json::to_string_pretty(&statuses)
                .context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Render statuses as an aligned text table with a trailing count line
pub(crate) fn format_table(statuses: &[MigrationStatus]) -> String {
    if statuses.is_empty() {
        return "No migrations found\n".to_string();
    }

    let version_width = statuses
        .iter()
        .map(|s| s.version.to_string().len())
        .max()
        .unwrap_or(7)
        .max(7);
    let name_width = statuses
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let state_width = 7;

    let mut out = String::new();
    out.push_str(&format!(
        "{:<version_width$}  {:<name_width$}  {:<state_width$}  APPLIED_AT\n",
        "VERSION", "NAME", "STATE",
    ));
    out.push_str(&format!(
        "{:-<version_width$}  {:-<name_width$}  {:-<state_width$}  {}\n",
        "",
        "",
        "",
        "-".repeat(23),
    ));

    for status in statuses {
        let applied_at = status
            .state
            .applied_at()
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<version_width$}  {:<name_width$}  {:<state_width$}  {}\n",
            status.version,
            status.name,
            status.state.label(),
            applied_at,
        ));
    }

    let pending = statuses
        .iter()
        .filter(|s| s.state == MigrationState::Pending)
        .count();
    out.push('\n');
    out.push_str(&format!(
        "{} migrations, {} pending\n",
        statuses.len(),
        pending
    ));
    out
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
