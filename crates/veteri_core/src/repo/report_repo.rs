//! Read-only cross-table report queries.
//!
//! # Responsibility
//! - Aggregate veterinarian workload over the assignment table.
//! - Join treatments with pet and owner names for a date window.
//!
//! # Invariants
//! - Workload rows include veterinarians with zero assignments.
//! - Workload order is `appointment_count DESC, national_id ASC`.
//! - Period rows are inclusive on both ends, ordered `date ASC, id ASC`.

use crate::model::owner::NationalId;
use crate::model::pet::PetId;
use crate::model::treatment::Treatment;
use crate::repo::treatment_repo::parse_treatment_row;
use crate::repo::{column, ensure_connection_ready, logged, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

/// One veterinarian with the number of appointments assigned to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VeterinarianWorkload {
    pub national_id: NationalId,
    pub name: String,
    pub surname: String,
    pub specialty: String,
    pub appointment_count: u32,
}

/// Treatment enriched with pet and owner names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetTreatmentRow {
    pub treatment: Treatment,
    pub pet_name: String,
    /// `None` when the pet has no owner or the owner row is gone.
    pub owner_name: Option<String>,
    pub owner_surname: Option<String>,
}

impl PetTreatmentRow {
    pub fn owner_full_name(&self) -> Option<String> {
        match (&self.owner_name, &self.owner_surname) {
            (Some(name), Some(surname)) => Some(format!("{name} {surname}")),
            (Some(name), None) => Some(name.clone()),
            _ => None,
        }
    }
}

/// Repository interface for report queries.
pub trait ReportRepository {
    fn veterinarian_workload(&self) -> RepoResult<Vec<VeterinarianWorkload>>;
    fn treatments_for_pet_between(
        &self,
        pet_id: PetId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<PetTreatmentRow>>;
}

/// SQLite-backed report repository.
pub struct SqliteReportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReportRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "veterinarian_appointments", &["veterinarian_id"])?;
        ensure_connection_ready(conn, "treatments", &["pet_id", "date"])?;
        Ok(Self { conn })
    }
}

impl ReportRepository for SqliteReportRepository<'_> {
    fn veterinarian_workload(&self) -> RepoResult<Vec<VeterinarianWorkload>> {
        logged("report_workload", || {
            let mut stmt = self.conn.prepare(
                "SELECT
                    v.national_id AS national_id,
                    v.name AS name,
                    v.surname AS surname,
                    v.specialty AS specialty,
                    COUNT(va.appointment_id) AS appointment_count
                 FROM veterinarians v
                 LEFT JOIN veterinarian_appointments va
                    ON va.veterinarian_id = v.national_id
                 GROUP BY v.national_id, v.name, v.surname, v.specialty
                 ORDER BY appointment_count DESC, v.national_id ASC;",
            )?;
            let mut rows = stmt.query([])?;
            let mut workload = Vec::new();
            while let Some(row) = rows.next()? {
                workload.push(VeterinarianWorkload {
                    national_id: column(row, "veterinarian_workload", "national_id")?,
                    name: column(row, "veterinarian_workload", "name")?,
                    surname: column(row, "veterinarian_workload", "surname")?,
                    specialty: column(row, "veterinarian_workload", "specialty")?,
                    appointment_count: column(
                        row,
                        "veterinarian_workload",
                        "appointment_count",
                    )?,
                });
            }
            Ok(workload)
        })
    }

    fn treatments_for_pet_between(
        &self,
        pet_id: PetId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<PetTreatmentRow>> {
        logged("report_treatments_period", || {
            let mut stmt = self.conn.prepare(
                "SELECT
                    t.id AS id,
                    t.type AS type,
                    t.description AS description,
                    t.date AS date,
                    t.observations AS observations,
                    t.pet_id AS pet_id,
                    p.name AS pet_name,
                    o.name AS owner_name,
                    o.surname AS owner_surname
                 FROM treatments t
                 INNER JOIN pets p ON p.id = t.pet_id
                 LEFT JOIN owners o ON o.national_id = p.owner_id
                 WHERE t.pet_id = ?1
                   AND t.date BETWEEN ?2 AND ?3
                 ORDER BY t.date ASC, t.id ASC;",
            )?;
            let mut rows = stmt.query(params![pet_id, start, end])?;
            let mut report = Vec::new();
            while let Some(row) = rows.next()? {
                report.push(PetTreatmentRow {
                    treatment: parse_treatment_row(row)?,
                    pet_name: column(row, "pet_treatments", "pet_name")?,
                    owner_name: column(row, "pet_treatments", "owner_name")?,
                    owner_surname: column(row, "pet_treatments", "owner_surname")?,
                });
            }
            Ok(report)
        })
    }
}
