//! Pet repository contract and SQLite implementation.
//!
//! # Invariants
//! - `insert_pet` writes the store-assigned id back only after the row exists.
//! - `update_pet` is a full-row replace; there is no partial-field update.
//! - Status text is written lowercase and parsed case-insensitively.

use crate::model::pet::{Pet, PetId, PetStatus};
use crate::model::ValidationError;
use crate::repo::{column, ensure_connection_ready, logged, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};

const PET_COLUMNS: &[&str] = &[
    "id",
    "name",
    "species",
    "breed",
    "birth_date",
    "weight",
    "status",
    "death_date",
    "owner_id",
    "memorial_notes",
];

const PET_SELECT_SQL: &str = "SELECT
    id,
    name,
    species,
    breed,
    birth_date,
    weight,
    status,
    death_date,
    owner_id,
    memorial_notes
FROM pets";

/// Repository interface for pet CRUD operations.
pub trait PetRepository {
    fn list_pets(&self) -> RepoResult<Vec<Pet>>;
    fn get_pet(&self, id: PetId) -> RepoResult<Option<Pet>>;
    /// Inserts `pet` and stores the assigned id in `pet.id`.
    fn insert_pet(&self, pet: &mut Pet) -> RepoResult<usize>;
    fn update_pet(&self, pet: &Pet) -> RepoResult<usize>;
    fn delete_pet(&self, id: PetId) -> RepoResult<usize>;
}

/// SQLite-backed pet repository.
pub struct SqlitePetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePetRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "pets", PET_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl PetRepository for SqlitePetRepository<'_> {
    fn list_pets(&self) -> RepoResult<Vec<Pet>> {
        logged("pet_list", || {
            let mut stmt = self.conn.prepare(PET_SELECT_SQL)?;
            let mut rows = stmt.query([])?;
            let mut pets = Vec::new();
            while let Some(row) = rows.next()? {
                pets.push(parse_pet_row(row)?);
            }
            Ok(pets)
        })
    }

    fn get_pet(&self, id: PetId) -> RepoResult<Option<Pet>> {
        logged("pet_get", || {
            let mut stmt = self
                .conn
                .prepare(&format!("{PET_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_pet_row(row)?));
            }
            Ok(None)
        })
    }

    fn insert_pet(&self, pet: &mut Pet) -> RepoResult<usize> {
        logged("pet_insert", || {
            pet.validate()?;
            let changed = self.conn.execute(
                "INSERT INTO pets (
                    name,
                    species,
                    breed,
                    birth_date,
                    weight,
                    status,
                    death_date,
                    owner_id,
                    memorial_notes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
                params![
                    pet.name,
                    pet.species,
                    pet.breed,
                    pet.birth_date,
                    pet.weight,
                    pet.status.as_str(),
                    pet.death_date,
                    pet.owner_key(),
                    pet.memorial_notes.as_deref(),
                ],
            )?;
            let id = self.conn.last_insert_rowid();
            pet.id = Some(id);
            info!("event=pet_insert module=repo status=ok pet_id={id} rows={changed}");
            Ok(changed)
        })
    }

    fn update_pet(&self, pet: &Pet) -> RepoResult<usize> {
        logged("pet_update", || {
            let id = pet.id.ok_or(ValidationError::MissingId("pet"))?;
            pet.validate()?;
            let changed = self.conn.execute(
                "UPDATE pets
                 SET
                    name = ?1,
                    species = ?2,
                    breed = ?3,
                    birth_date = ?4,
                    weight = ?5,
                    status = ?6,
                    death_date = ?7,
                    owner_id = ?8,
                    memorial_notes = ?9
                 WHERE id = ?10;",
                params![
                    pet.name,
                    pet.species,
                    pet.breed,
                    pet.birth_date,
                    pet.weight,
                    pet.status.as_str(),
                    pet.death_date,
                    pet.owner_key(),
                    pet.memorial_notes.as_deref(),
                    id,
                ],
            )?;
            info!("event=pet_update module=repo status=ok pet_id={id} rows={changed}");
            Ok(changed)
        })
    }

    fn delete_pet(&self, id: PetId) -> RepoResult<usize> {
        logged("pet_delete", || {
            let changed = self.conn.execute("DELETE FROM pets WHERE id = ?1;", [id])?;
            info!("event=pet_delete module=repo status=ok pet_id={id} rows={changed}");
            Ok(changed)
        })
    }
}

fn parse_pet_row(row: &Row<'_>) -> RepoResult<Pet> {
    let status_text: String = column(row, "pets", "status")?;
    let status = status_text.parse::<PetStatus>()?;

    let pet = Pet {
        id: Some(column(row, "pets", "id")?),
        name: column(row, "pets", "name")?,
        species: column(row, "pets", "species")?,
        breed: column(row, "pets", "breed")?,
        birth_date: column(row, "pets", "birth_date")?,
        weight: column(row, "pets", "weight")?,
        status,
        death_date: column(row, "pets", "death_date")?,
        owner_id: column(row, "pets", "owner_id")?,
        memorial_notes: column(row, "pets", "memorial_notes")?,
    };
    pet.validate()?;
    Ok(pet)
}
