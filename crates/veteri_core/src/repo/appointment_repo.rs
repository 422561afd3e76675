//! Appointment repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `appointments`.
//! - Own the atomic "appointment + veterinarian assignments" write.
//!
//! # Invariants
//! - `insert_with_veterinarians` commits the appointment row and every
//!   assignment row in one `IMMEDIATE` transaction, or nothing.
//! - Assignment rows are removed by cascade when either side is deleted.

use crate::model::appointment::{Appointment, AppointmentId, AppointmentStatus};
use crate::model::owner::NationalId;
use crate::model::ValidationError;
use crate::repo::{column, ensure_connection_ready, logged, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const APPOINTMENT_COLUMNS: &[&str] = &["id", "date_time", "reason", "status", "pet_id"];

const APPOINTMENT_SELECT_SQL: &str = "SELECT
    id,
    date_time,
    reason,
    status,
    pet_id
FROM appointments";

/// Repository interface for appointment operations.
pub trait AppointmentRepository {
    fn list_appointments(&self) -> RepoResult<Vec<Appointment>>;
    fn get_appointment(&self, id: AppointmentId) -> RepoResult<Option<Appointment>>;
    /// Inserts `appointment` and stores the assigned id in `appointment.id`.
    fn insert_appointment(&self, appointment: &mut Appointment) -> RepoResult<usize>;
    fn update_appointment(&self, appointment: &Appointment) -> RepoResult<usize>;
    fn delete_appointment(&self, id: AppointmentId) -> RepoResult<usize>;
    /// Inserts `appointment` plus one assignment row per veterinarian id in
    /// one transaction. Returns total rows affected across both tables.
    fn insert_with_veterinarians(
        &self,
        appointment: &mut Appointment,
        veterinarian_ids: &[NationalId],
    ) -> RepoResult<usize>;
    /// Lists veterinarian ids assigned to one appointment, ascending.
    fn list_assigned_veterinarians(&self, id: AppointmentId) -> RepoResult<Vec<NationalId>>;
}

/// SQLite-backed appointment repository.
pub struct SqliteAppointmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAppointmentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "appointments", APPOINTMENT_COLUMNS)?;
        ensure_connection_ready(
            conn,
            "veterinarian_appointments",
            &["veterinarian_id", "appointment_id"],
        )?;
        Ok(Self { conn })
    }
}

impl AppointmentRepository for SqliteAppointmentRepository<'_> {
    fn list_appointments(&self) -> RepoResult<Vec<Appointment>> {
        logged("appointment_list", || {
            let mut stmt = self.conn.prepare(APPOINTMENT_SELECT_SQL)?;
            let mut rows = stmt.query([])?;
            let mut appointments = Vec::new();
            while let Some(row) = rows.next()? {
                appointments.push(parse_appointment_row(row)?);
            }
            Ok(appointments)
        })
    }

    fn get_appointment(&self, id: AppointmentId) -> RepoResult<Option<Appointment>> {
        logged("appointment_get", || {
            let mut stmt = self
                .conn
                .prepare(&format!("{APPOINTMENT_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_appointment_row(row)?));
            }
            Ok(None)
        })
    }

    fn insert_appointment(&self, appointment: &mut Appointment) -> RepoResult<usize> {
        logged("appointment_insert", || {
            appointment.validate()?;
            let changed = insert_appointment_row(self.conn, appointment)?;
            let id = self.conn.last_insert_rowid();
            appointment.id = Some(id);
            info!(
                "event=appointment_insert module=repo status=ok appointment_id={id} rows={changed}"
            );
            Ok(changed)
        })
    }

    fn update_appointment(&self, appointment: &Appointment) -> RepoResult<usize> {
        logged("appointment_update", || {
            let id = appointment
                .id
                .ok_or(ValidationError::MissingId("appointment"))?;
            appointment.validate()?;
            let changed = self.conn.execute(
                "UPDATE appointments
                 SET
                    date_time = ?1,
                    reason = ?2,
                    status = ?3,
                    pet_id = ?4
                 WHERE id = ?5;",
                params![
                    appointment.date_time,
                    appointment.reason,
                    appointment.status.as_str(),
                    appointment.pet_id,
                    id,
                ],
            )?;
            info!(
                "event=appointment_update module=repo status=ok appointment_id={id} rows={changed}"
            );
            Ok(changed)
        })
    }

    fn delete_appointment(&self, id: AppointmentId) -> RepoResult<usize> {
        logged("appointment_delete", || {
            let changed = self
                .conn
                .execute("DELETE FROM appointments WHERE id = ?1;", [id])?;
            info!(
                "event=appointment_delete module=repo status=ok appointment_id={id} rows={changed}"
            );
            Ok(changed)
        })
    }

    fn insert_with_veterinarians(
        &self,
        appointment: &mut Appointment,
        veterinarian_ids: &[NationalId],
    ) -> RepoResult<usize> {
        logged("appointment_register", || {
            appointment.validate()?;

            let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
            let mut changed = insert_appointment_row(&tx, appointment)?;
            let id = tx.last_insert_rowid();

            for veterinarian_id in veterinarian_ids {
                changed += tx.execute(
                    "INSERT INTO veterinarian_appointments (veterinarian_id, appointment_id)
                     VALUES (?1, ?2);",
                    params![veterinarian_id, id],
                )?;
            }

            tx.commit()?;
            appointment.id = Some(id);
            info!(
                "event=appointment_register module=repo status=ok appointment_id={} veterinarians={} rows={}",
                id,
                veterinarian_ids.len(),
                changed
            );
            Ok(changed)
        })
    }

    fn list_assigned_veterinarians(&self, id: AppointmentId) -> RepoResult<Vec<NationalId>> {
        logged("appointment_assignments", || {
            let mut stmt = self.conn.prepare(
                "SELECT veterinarian_id
                 FROM veterinarian_appointments
                 WHERE appointment_id = ?1
                 ORDER BY veterinarian_id ASC;",
            )?;
            let mut rows = stmt.query([id])?;
            let mut ids = Vec::new();
            while let Some(row) = rows.next()? {
                ids.push(row.get(0)?);
            }
            Ok(ids)
        })
    }
}

fn insert_appointment_row(conn: &Connection, appointment: &Appointment) -> RepoResult<usize> {
    let changed = conn.execute(
        "INSERT INTO appointments (
            date_time,
            reason,
            status,
            pet_id
        ) VALUES (?1, ?2, ?3, ?4);",
        params![
            appointment.date_time,
            appointment.reason,
            appointment.status.as_str(),
            appointment.pet_id,
        ],
    )?;
    Ok(changed)
}

fn parse_appointment_row(row: &Row<'_>) -> RepoResult<Appointment> {
    let status_text: String = column(row, "appointments", "status")?;
    let status = status_text.parse::<AppointmentStatus>()?;

    let appointment = Appointment {
        id: Some(column(row, "appointments", "id")?),
        date_time: column(row, "appointments", "date_time")?,
        reason: column(row, "appointments", "reason")?,
        status,
        pet_id: column(row, "appointments", "pet_id")?,
    };
    appointment.validate()?;
    Ok(appointment)
}
