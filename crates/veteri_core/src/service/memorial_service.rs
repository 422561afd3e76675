//! Memorial use-cases for deceased pets.
//!
//! # Responsibility
//! - List deceased pets.
//! - Aggregate the memorial detail view (owner, appointments, treatments).
//! - Replace memorial notes through a full-record pet update.
//!
//! # Invariants
//! - Detail and notes operations only proceed for DECEASED pets.
//! - "No owner set" and "owner row missing" are distinct outcomes.

use crate::model::appointment::Appointment;
use crate::model::owner::{NationalId, Owner};
use crate::model::pet::{Pet, PetId, PetStatus};
use crate::model::treatment::Treatment;
use crate::repo::appointment_repo::{AppointmentRepository, SqliteAppointmentRepository};
use crate::repo::owner_repo::{OwnerRepository, SqliteOwnerRepository};
use crate::repo::pet_repo::{PetRepository, SqlitePetRepository};
use crate::repo::treatment_repo::{SqliteTreatmentRepository, TreatmentRepository};
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Marker rendered when a deceased pet has no memorial notes.
pub const NO_MEMORIAL_NOTES: &str = "No memorial notes recorded for this pet.";

/// Service error for memorial use-cases.
#[derive(Debug)]
pub enum MemorialError {
    /// No pet row with this id.
    PetNotFound(PetId),
    /// Pet exists but is not DECEASED.
    NotDeceased { pet_id: PetId, status: PetStatus },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for MemorialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PetNotFound(pet_id) => write!(f, "pet {pet_id} not found"),
            Self::NotDeceased { pet_id, status } => write!(
                f,
                "pet {pet_id} is not registered as deceased (current status: {status})"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemorialError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MemorialError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of resolving a pet's owner key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerLookup {
    /// The pet has no owner key.
    NotSet,
    /// The key is set but no owner row matches it.
    Missing(NationalId),
    Found(Owner),
}

/// Aggregated memorial view for one deceased pet.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorialDetail {
    pub pet: Pet,
    pub owner: OwnerLookup,
    pub appointments: Vec<Appointment>,
    pub treatments: Vec<Treatment>,
}

impl MemorialDetail {
    /// Memorial notes, or [`NO_MEMORIAL_NOTES`] when absent or empty.
    pub fn notes_or_marker(&self) -> &str {
        match self.pet.memorial_notes.as_deref() {
            Some(notes) if !notes.trim().is_empty() => notes,
            _ => NO_MEMORIAL_NOTES,
        }
    }
}

/// Memorial service facade over the pet, owner, appointment and treatment repositories.
pub struct MemorialService<P, O, A, T> {
    pets: P,
    owners: O,
    appointments: A,
    treatments: T,
}

/// Memorial service wired to SQLite repositories on one connection.
pub type SqliteMemorialService<'conn> = MemorialService<
    SqlitePetRepository<'conn>,
    SqliteOwnerRepository<'conn>,
    SqliteAppointmentRepository<'conn>,
    SqliteTreatmentRepository<'conn>,
>;

impl<'conn> SqliteMemorialService<'conn> {
    /// Builds the service with SQLite repositories sharing `conn`.
    pub fn with_connection(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqlitePetRepository::try_new(conn)?,
            SqliteOwnerRepository::try_new(conn)?,
            SqliteAppointmentRepository::try_new(conn)?,
            SqliteTreatmentRepository::try_new(conn)?,
        ))
    }
}

impl<P, O, A, T> MemorialService<P, O, A, T>
where
    P: PetRepository,
    O: OwnerRepository,
    A: AppointmentRepository,
    T: TreatmentRepository,
{
    pub fn new(pets: P, owners: O, appointments: A, treatments: T) -> Self {
        Self {
            pets,
            owners,
            appointments,
            treatments,
        }
    }

    /// Lists every DECEASED pet in store order.
    pub fn list_deceased(&self) -> Result<Vec<Pet>, MemorialError> {
        let pets = self.pets.list_pets()?;
        Ok(pets.into_iter().filter(Pet::is_deceased).collect())
    }

    /// Builds the memorial view for one deceased pet.
    pub fn memorial_detail(&self, pet_id: PetId) -> Result<MemorialDetail, MemorialError> {
        let pet = self.load_deceased(pet_id)?;

        let owner = match pet.owner_key() {
            None => OwnerLookup::NotSet,
            Some(key) => match self.owners.get_owner(key)? {
                Some(owner) => OwnerLookup::Found(owner),
                None => OwnerLookup::Missing(key.to_string()),
            },
        };

        let appointments = self
            .appointments
            .list_appointments()?
            .into_iter()
            .filter(|appointment| appointment.pet_id == pet_id)
            .collect();
        let treatments = self
            .treatments
            .list_treatments()?
            .into_iter()
            .filter(|treatment| treatment.pet_id == pet_id)
            .collect();

        Ok(MemorialDetail {
            pet,
            owner,
            appointments,
            treatments,
        })
    }

    /// Replaces the memorial notes of one deceased pet and returns the stored record.
    ///
    /// # Contract
    /// - Empty input or `N/A` (any case) clears notes to `None`.
    /// - Every other field is written back exactly as loaded.
    pub fn update_notes(&self, pet_id: PetId, input: &str) -> Result<Pet, MemorialError> {
        let mut pet = self.load_deceased(pet_id)?;
        pet.set_memorial_notes(input);

        if self.pets.update_pet(&pet)? == 0 {
            return Err(MemorialError::PetNotFound(pet_id));
        }

        info!(
            "event=memorial_notes_update module=service status=ok pet_id={} has_notes={}",
            pet_id,
            pet.memorial_notes.is_some()
        );
        Ok(pet)
    }

    fn load_deceased(&self, pet_id: PetId) -> Result<Pet, MemorialError> {
        let pet = self
            .pets
            .get_pet(pet_id)?
            .ok_or(MemorialError::PetNotFound(pet_id))?;
        if !pet.is_deceased() {
            return Err(MemorialError::NotDeceased {
                pet_id,
                status: pet.status,
            });
        }
        Ok(pet)
    }
}
