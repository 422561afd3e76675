//! Appointment registration use-case.
//!
//! # Invariants
//! - Registration creates the appointment and all assignments atomically.
//! - Veterinarian ids are trimmed, blank ids dropped and duplicates collapsed
//!   before persistence.

use crate::model::appointment::{Appointment, AppointmentStatus};
use crate::model::owner::NationalId;
use crate::model::pet::PetId;
use crate::repo::appointment_repo::AppointmentRepository;
use crate::repo::RepoResult;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Stored appointment with its assigned id.
    pub appointment: Appointment,
    /// Normalized veterinarian ids that were assigned.
    pub veterinarian_ids: Vec<NationalId>,
}

/// Use-case service for appointment registration.
pub struct AppointmentService<R: AppointmentRepository> {
    repo: R,
}

impl<R: AppointmentRepository> AppointmentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a PENDING appointment and assigns zero or more veterinarians.
    pub fn register_with_veterinarians(
        &self,
        date_time: NaiveDateTime,
        reason: impl Into<String>,
        pet_id: PetId,
        veterinarian_ids: &[String],
    ) -> RepoResult<Registration> {
        let veterinarian_ids = normalize_veterinarian_ids(veterinarian_ids);
        let mut appointment =
            Appointment::new(date_time, reason, AppointmentStatus::Pending, pet_id);
        self.repo
            .insert_with_veterinarians(&mut appointment, &veterinarian_ids)?;
        Ok(Registration {
            appointment,
            veterinarian_ids,
        })
    }
}

/// Splits comma-separated veterinarian ids.
pub fn parse_veterinarian_ids(input: &str) -> Vec<NationalId> {
    normalize_veterinarian_ids(
        &input
            .split(',')
            .map(str::to_string)
            .collect::<Vec<_>>(),
    )
}

/// Trims, drops blanks and deduplicates veterinarian ids in ascending order.
pub fn normalize_veterinarian_ids(ids: &[String]) -> Vec<NationalId> {
    let unique: BTreeSet<NationalId> = ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    unique.into_iter().collect()
}
