//! Owner repository contract and SQLite implementation.

use crate::model::owner::Owner;
use crate::repo::{ensure_connection_ready, logged, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};

const OWNER_COLUMNS: &[&str] = &["national_id", "name", "surname", "phone", "email", "address"];

const OWNER_SELECT_SQL: &str = "SELECT
    national_id,
    name,
    surname,
    phone,
    email,
    address
FROM owners";

/// Repository interface for owner CRUD operations.
pub trait OwnerRepository {
    fn list_owners(&self) -> RepoResult<Vec<Owner>>;
    fn get_owner(&self, national_id: &str) -> RepoResult<Option<Owner>>;
    fn insert_owner(&self, owner: &Owner) -> RepoResult<usize>;
    fn update_owner(&self, owner: &Owner) -> RepoResult<usize>;
    fn delete_owner(&self, national_id: &str) -> RepoResult<usize>;
}

/// SQLite-backed owner repository.
pub struct SqliteOwnerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOwnerRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "owners", OWNER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl OwnerRepository for SqliteOwnerRepository<'_> {
    fn list_owners(&self) -> RepoResult<Vec<Owner>> {
        logged("owner_list", || {
            let mut stmt = self.conn.prepare(OWNER_SELECT_SQL)?;
            let mut rows = stmt.query([])?;
            let mut owners = Vec::new();
            while let Some(row) = rows.next()? {
                owners.push(parse_owner_row(row)?);
            }
            Ok(owners)
        })
    }

    fn get_owner(&self, national_id: &str) -> RepoResult<Option<Owner>> {
        logged("owner_get", || {
            let mut stmt = self
                .conn
                .prepare(&format!("{OWNER_SELECT_SQL} WHERE national_id = ?1;"))?;
            let mut rows = stmt.query([national_id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_owner_row(row)?));
            }
            Ok(None)
        })
    }

    fn insert_owner(&self, owner: &Owner) -> RepoResult<usize> {
        logged("owner_insert", || {
            owner.validate()?;
            let changed = self.conn.execute(
                "INSERT INTO owners (
                    national_id,
                    name,
                    surname,
                    phone,
                    email,
                    address
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    owner.national_id,
                    owner.name,
                    owner.surname,
                    owner.phone,
                    owner.email,
                    owner.address,
                ],
            )?;
            info!("event=owner_insert module=repo status=ok rows={changed}");
            Ok(changed)
        })
    }

    fn update_owner(&self, owner: &Owner) -> RepoResult<usize> {
        logged("owner_update", || {
            owner.validate()?;
            let changed = self.conn.execute(
                "UPDATE owners
                 SET
                    name = ?1,
                    surname = ?2,
                    phone = ?3,
                    email = ?4,
                    address = ?5
                 WHERE national_id = ?6;",
                params![
                    owner.name,
                    owner.surname,
                    owner.phone,
                    owner.email,
                    owner.address,
                    owner.national_id,
                ],
            )?;
            info!("event=owner_update module=repo status=ok rows={changed}");
            Ok(changed)
        })
    }

    fn delete_owner(&self, national_id: &str) -> RepoResult<usize> {
        logged("owner_delete", || {
            let changed = self
                .conn
                .execute("DELETE FROM owners WHERE national_id = ?1;", [national_id])?;
            info!("event=owner_delete module=repo status=ok rows={changed}");
            Ok(changed)
        })
    }
}

fn parse_owner_row(row: &Row<'_>) -> RepoResult<Owner> {
    let owner = Owner {
        national_id: row.get("national_id")?,
        name: row.get("name")?,
        surname: row.get("surname")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
    };
    owner.validate()?;
    Ok(owner)
}
