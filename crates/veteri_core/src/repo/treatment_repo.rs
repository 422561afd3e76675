//! Treatment repository contract and SQLite implementation.

use crate::model::treatment::{Treatment, TreatmentId};
use crate::model::ValidationError;
use crate::repo::{column, ensure_connection_ready, logged, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};

const TREATMENT_COLUMNS: &[&str] = &[
    "id",
    "type",
    "description",
    "date",
    "observations",
    "pet_id",
];

const TREATMENT_SELECT_SQL: &str = "SELECT
    id,
    type,
    description,
    date,
    observations,
    pet_id
FROM treatments";

/// Repository interface for treatment CRUD operations.
pub trait TreatmentRepository {
    fn list_treatments(&self) -> RepoResult<Vec<Treatment>>;
    fn get_treatment(&self, id: TreatmentId) -> RepoResult<Option<Treatment>>;
    /// Inserts `treatment` and stores the assigned id in `treatment.id`.
    fn insert_treatment(&self, treatment: &mut Treatment) -> RepoResult<usize>;
    fn update_treatment(&self, treatment: &Treatment) -> RepoResult<usize>;
    fn delete_treatment(&self, id: TreatmentId) -> RepoResult<usize>;
}

/// SQLite-backed treatment repository.
pub struct SqliteTreatmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTreatmentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "treatments", TREATMENT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TreatmentRepository for SqliteTreatmentRepository<'_> {
    fn list_treatments(&self) -> RepoResult<Vec<Treatment>> {
        logged("treatment_list", || {
            let mut stmt = self.conn.prepare(TREATMENT_SELECT_SQL)?;
            let mut rows = stmt.query([])?;
            let mut treatments = Vec::new();
            while let Some(row) = rows.next()? {
                treatments.push(parse_treatment_row(row)?);
            }
            Ok(treatments)
        })
    }

    fn get_treatment(&self, id: TreatmentId) -> RepoResult<Option<Treatment>> {
        logged("treatment_get", || {
            let mut stmt = self
                .conn
                .prepare(&format!("{TREATMENT_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_treatment_row(row)?));
            }
            Ok(None)
        })
    }

    fn insert_treatment(&self, treatment: &mut Treatment) -> RepoResult<usize> {
        logged("treatment_insert", || {
            treatment.validate()?;
            let changed = self.conn.execute(
                "INSERT INTO treatments (
                    type,
                    description,
                    date,
                    observations,
                    pet_id
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    treatment.kind,
                    treatment.description,
                    treatment.date,
                    treatment.observations,
                    treatment.pet_id,
                ],
            )?;
            let id = self.conn.last_insert_rowid();
            treatment.id = Some(id);
            info!("event=treatment_insert module=repo status=ok treatment_id={id} rows={changed}");
            Ok(changed)
        })
    }

    fn update_treatment(&self, treatment: &Treatment) -> RepoResult<usize> {
        logged("treatment_update", || {
            let id = treatment.id.ok_or(ValidationError::MissingId("treatment"))?;
            treatment.validate()?;
            let changed = self.conn.execute(
                "UPDATE treatments
                 SET
                    type = ?1,
                    description = ?2,
                    date = ?3,
                    observations = ?4,
                    pet_id = ?5
                 WHERE id = ?6;",
                params![
                    treatment.kind,
                    treatment.description,
                    treatment.date,
                    treatment.observations,
                    treatment.pet_id,
                    id,
                ],
            )?;
            info!("event=treatment_update module=repo status=ok treatment_id={id} rows={changed}");
            Ok(changed)
        })
    }

    fn delete_treatment(&self, id: TreatmentId) -> RepoResult<usize> {
        logged("treatment_delete", || {
            let changed = self
                .conn
                .execute("DELETE FROM treatments WHERE id = ?1;", [id])?;
            info!("event=treatment_delete module=repo status=ok treatment_id={id} rows={changed}");
            Ok(changed)
        })
    }
}

/// Maps a row exposing the treatment column names to a record.
pub(crate) fn parse_treatment_row(row: &Row<'_>) -> RepoResult<Treatment> {
    let treatment = Treatment {
        id: Some(column(row, "treatments", "id")?),
        kind: column(row, "treatments", "type")?,
        description: column(row, "treatments", "description")?,
        date: column(row, "treatments", "date")?,
        observations: column(row, "treatments", "observations")?,
        pet_id: column(row, "treatments", "pet_id")?,
    };
    treatment.validate()?;
    Ok(treatment)
}
