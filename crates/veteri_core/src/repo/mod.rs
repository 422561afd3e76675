//! Repository layer: one contract plus one SQLite implementation per entity.
//!
//! # Responsibility
//! - Translate between clinic table rows and model records.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - "Not found" is never an error: reads return `None`/empty, writes
//!   return `Ok(0)` rows affected.
//! - Store failures surface as `Err(RepoError)` and are logged once here.
//! - Write paths validate records before SQL; read paths validate rows
//!   after mapping.

use crate::db::migrations::{latest_version, schema_state};
use crate::db::{DbError, SchemaState};
use crate::model::{UnrecognizedStatus, ValidationError};
use log::error;
use rusqlite::types::FromSql;
use rusqlite::{Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod appointment_repo;
pub mod owner_repo;
pub mod pet_repo;
pub mod report_repo;
pub mod treatment_repo;
pub mod veterinarian_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every clinic table.
#[derive(Debug)]
pub enum RepoError {
    /// SQLite statement or connectivity failure.
    Db(DbError),
    /// Record failed model validation before write or after read.
    Validation(ValidationError),
    /// Persisted status text does not map to a known variant.
    UnrecognizedStatus(UnrecognizedStatus),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// A stored value cannot be read as its column type, e.g. a date
    /// column holding `soon` or a count past `u32::MAX`.
    InvalidData(String),
}

impl RepoError {
    /// Whether the store rejected the statement on a constraint
    /// (foreign key, primary key, check).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _)))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnrecognizedStatus(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::UnrecognizedStatus(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<UnrecognizedStatus> for RepoError {
    fn from(value: UnrecognizedStatus) -> Self {
        Self::UnrecognizedStatus(value)
    }
}

/// Runs one repository operation and logs its failure, if any.
pub(crate) fn logged<T>(event: &'static str, op: impl FnOnce() -> RepoResult<T>) -> RepoResult<T> {
    let result = op();
    if let Err(err) = &result {
        error!("event={event} module=repo status=error error={err}");
    }
    result
}

/// Reads `name` from `row`, reporting undecodable values as
/// [`RepoError::InvalidData`] instead of a bare SQLite error.
pub(crate) fn column<T: FromSql>(row: &Row<'_>, table: &str, name: &str) -> RepoResult<T> {
    row.get(name).map_err(|err| match err {
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..)
        | rusqlite::Error::InvalidColumnType(..) => {
            RepoError::InvalidData(format!("{table}.{name}: {err}"))
        }
        other => other.into(),
    })
}

/// Verifies schema version, table and columns before a repository is handed out.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let state = schema_state(conn)?;
    if !matches!(state, SchemaState::Current(_)) {
        return Err(RepoError::UninitializedConnection {
            expected_version: latest_version(),
            actual_version: state.actual(),
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
