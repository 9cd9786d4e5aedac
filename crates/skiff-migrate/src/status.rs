//! Per-migration status reporting.

use chrono::NaiveDateTime;
use serde::Serialize;
use skiff_core::{AppliedRecord, Migration};
use std::collections::BTreeMap;

/// State of one migration version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MigrationState {
    /// Source present and recorded.
    Applied { applied_at: NaiveDateTime },
    /// Source present, not yet recorded.
    Pending,
    /// Recorded, but no source carries this version any more.
    Missing { applied_at: NaiveDateTime },
}

impl MigrationState {
    /// Short lowercase label for table output.
    pub fn label(&self) -> &'static str {
        match self {
            MigrationState::Applied { .. } => "applied",
            MigrationState::Pending => "pending",
            MigrationState::Missing { .. } => "missing",
        }
    }

    /// When the migration was recorded, if it was.
    pub fn applied_at(&self) -> Option<NaiveDateTime> {
        match self {
            MigrationState::Applied { applied_at } | MigrationState::Missing { applied_at } => {
                Some(*applied_at)
            }
            MigrationState::Pending => None,
        }
    }
}

/// Status of a single migration version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub version: i64,
    pub name: String,
    #[serde(flatten)]
    pub state: MigrationState,
}

/// Join loaded migrations with applied records, ordered by version.
pub(crate) fn merge_status(
    migrations: Vec<Migration>,
    records: Vec<AppliedRecord>,
) -> Vec<MigrationStatus> {
    let mut recorded: BTreeMap<i64, AppliedRecord> =
        records.into_iter().map(|r| (r.version, r)).collect();

    let mut statuses: BTreeMap<i64, MigrationStatus> = BTreeMap::new();
    for migration in migrations {
        let state = match recorded.remove(&migration.version) {
            Some(record) => MigrationState::Applied {
                applied_at: record.applied_at,
            },
            None => MigrationState::Pending,
        };
        statuses.insert(
            migration.version,
            MigrationStatus {
                version: migration.version,
                name: migration.name,
                state,
            },
        );
    }

    for (version, record) in recorded {
        statuses.insert(
            version,
            MigrationStatus {
                version,
                name: record.name,
                state: MigrationState::Missing {
                    applied_at: record.applied_at,
                },
            },
        );
    }

    statuses.into_values().collect()
}
