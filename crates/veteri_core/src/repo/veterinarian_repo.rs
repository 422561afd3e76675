//! Veterinarian repository contract and SQLite implementation.

use crate::model::veterinarian::Veterinarian;
use crate::repo::{ensure_connection_ready, logged, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};

const VETERINARIAN_COLUMNS: &[&str] = &[
    "national_id",
    "name",
    "surname",
    "specialty",
    "phone",
    "email",
];

const VETERINARIAN_SELECT_SQL: &str = "SELECT
    national_id,
    name,
    surname,
    specialty,
    phone,
    email
FROM veterinarians";

/// Repository interface for veterinarian CRUD operations.
pub trait VeterinarianRepository {
    fn list_veterinarians(&self) -> RepoResult<Vec<Veterinarian>>;
    fn get_veterinarian(&self, national_id: &str) -> RepoResult<Option<Veterinarian>>;
    fn insert_veterinarian(&self, veterinarian: &Veterinarian) -> RepoResult<usize>;
    fn update_veterinarian(&self, veterinarian: &Veterinarian) -> RepoResult<usize>;
    fn delete_veterinarian(&self, national_id: &str) -> RepoResult<usize>;
}

/// SQLite-backed veterinarian repository.
pub struct SqliteVeterinarianRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVeterinarianRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "veterinarians", VETERINARIAN_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl VeterinarianRepository for SqliteVeterinarianRepository<'_> {
    fn list_veterinarians(&self) -> RepoResult<Vec<Veterinarian>> {
        logged("veterinarian_list", || {
            let mut stmt = self.conn.prepare(VETERINARIAN_SELECT_SQL)?;
            let mut rows = stmt.query([])?;
            let mut veterinarians = Vec::new();
            while let Some(row) = rows.next()? {
                veterinarians.push(parse_veterinarian_row(row)?);
            }
            Ok(veterinarians)
        })
    }

    fn get_veterinarian(&self, national_id: &str) -> RepoResult<Option<Veterinarian>> {
        logged("veterinarian_get", || {
            let mut stmt = self.conn.prepare(&format!(
                "{VETERINARIAN_SELECT_SQL} WHERE national_id = ?1;"
            ))?;
            let mut rows = stmt.query([national_id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_veterinarian_row(row)?));
            }
            Ok(None)
        })
    }

    fn insert_veterinarian(&self, veterinarian: &Veterinarian) -> RepoResult<usize> {
        logged("veterinarian_insert", || {
            veterinarian.validate()?;
            let changed = self.conn.execute(
                "INSERT INTO veterinarians (
                    national_id,
                    name,
                    surname,
                    specialty,
                    phone,
                    email
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    veterinarian.national_id,
                    veterinarian.name,
                    veterinarian.surname,
                    veterinarian.specialty,
                    veterinarian.phone,
                    veterinarian.email,
                ],
            )?;
            info!("event=veterinarian_insert module=repo status=ok rows={changed}");
            Ok(changed)
        })
    }

    fn update_veterinarian(&self, veterinarian: &Veterinarian) -> RepoResult<usize> {
        logged("veterinarian_update", || {
            veterinarian.validate()?;
            let changed = self.conn.execute(
                "UPDATE veterinarians
                 SET
                    name = ?1,
                    surname = ?2,
                    specialty = ?3,
                    phone = ?4,
                    email = ?5
                 WHERE national_id = ?6;",
                params![
                    veterinarian.name,
                    veterinarian.surname,
                    veterinarian.specialty,
                    veterinarian.phone,
                    veterinarian.email,
                    veterinarian.national_id,
                ],
            )?;
            info!("event=veterinarian_update module=repo status=ok rows={changed}");
            Ok(changed)
        })
    }

    fn delete_veterinarian(&self, national_id: &str) -> RepoResult<usize> {
        logged("veterinarian_delete", || {
            let changed = self.conn.execute(
                "DELETE FROM veterinarians WHERE national_id = ?1;",
                [national_id],
            )?;
            info!("event=veterinarian_delete module=repo status=ok rows={changed}");
            Ok(changed)
        })
    }
}

fn parse_veterinarian_row(row: &Row<'_>) -> RepoResult<Veterinarian> {
    let veterinarian = Veterinarian {
        national_id: row.get("national_id")?,
        name: row.get("name")?,
        surname: row.get("surname")?,
        specialty: row.get("specialty")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
    };
    veterinarian.validate()?;
    Ok(veterinarian)
}
