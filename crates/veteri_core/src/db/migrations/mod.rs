//! Clinic schema history.
//!
//! Each step is an embedded SQL file. `PRAGMA user_version` holds the last
//! applied step, and pending steps share one transaction so a failure in
//! step N leaves the file at its previous version.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "clinic",
        sql: include_str!("0001_clinic.sql"),
    },
    Migration {
        version: 2,
        name: "veterinarian_appointments",
        sql: include_str!("0002_veterinarian_appointments.sql"),
    },
];

/// Where a connection's schema sits relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    Current(u32),
    Behind { actual: u32, latest: u32 },
    Ahead { actual: u32, latest: u32 },
}

impl SchemaState {
    pub fn actual(self) -> u32 {
        match self {
            Self::Current(version) => version,
            Self::Behind { actual, .. } | Self::Ahead { actual, .. } => actual,
        }
    }
}

/// Highest schema version this build can create.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Compares `PRAGMA user_version` on `conn` with [`latest_version`].
pub fn schema_state(conn: &Connection) -> DbResult<SchemaState> {
    let actual = current_user_version(conn)?;
    let latest = latest_version();
    Ok(match actual.cmp(&latest) {
        std::cmp::Ordering::Equal => SchemaState::Current(actual),
        std::cmp::Ordering::Less => SchemaState::Behind { actual, latest },
        std::cmp::Ordering::Greater => SchemaState::Ahead { actual, latest },
    })
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the file is ahead of this build.
/// - [`DbError::Migration`] naming the first step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let (from, latest) = match schema_state(conn)? {
        SchemaState::Current(_) => return Ok(()),
        SchemaState::Ahead { actual, latest } => {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: actual,
                latest_supported: latest,
            })
        }
        SchemaState::Behind { actual, latest } => (actual, latest),
    };

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|step| step.version > from) {
        if let Err(source) = run_step(&tx, migration) {
            error!(
                "event=db_migration_step module=db status=error version={} name={} error={}",
                migration.version, migration.name, source
            );
            return Err(DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            });
        }
        info!(
            "event=db_migration_step module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={latest}");
    Ok(())
}

fn run_step(tx: &Transaction<'_>, migration: &Migration) -> rusqlite::Result<()> {
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)
}

/// Reads `PRAGMA user_version` from `conn`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
