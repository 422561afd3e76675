//! Pet record and its ACTIVE/DECEASED lifecycle.
//!
//! # Invariants
//! - `status == Active` implies `death_date.is_none()`.
//! - `status == Deceased` implies `death_date.is_some()`.
//! - `memorial_notes` is only meaningful for deceased pets; it is kept as-is
//!   when a pet returns to active.

use super::owner::NationalId;
use super::{require_text, UnrecognizedStatus, ValidationError};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned pet identifier.
pub type PetId = i64;

/// Input that clears memorial notes, compared case-insensitively.
pub const MEMORIAL_NOTES_CLEAR_SENTINEL: &str = "N/A";

/// Pet lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Active,
    Deceased,
}

impl PetStatus {
    /// Lowercase persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deceased => "deceased",
        }
    }
}

impl Display for PetStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.write_str("ACTIVE"),
            Self::Deceased => f.write_str("DECEASED"),
        }
    }
}

impl FromStr for PetStatus {
    type Err = UnrecognizedStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "deceased" => Ok(Self::Deceased),
            _ => Err(UnrecognizedStatus {
                kind: "pet",
                value: value.to_string(),
            }),
        }
    }
}

/// Clinic patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// `None` until the store assigns an id on insert.
    pub id: Option<PetId>,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub birth_date: Option<NaiveDate>,
    /// Kilograms.
    pub weight: f64,
    pub status: PetStatus,
    pub death_date: Option<NaiveDate>,
    /// Owner national id; nullable foreign key.
    pub owner_id: Option<NationalId>,
    pub memorial_notes: Option<String>,
}

impl Pet {
    /// Creates an unsaved ACTIVE pet without death date or memorial notes.
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        breed: impl Into<String>,
        birth_date: Option<NaiveDate>,
        weight: f64,
        owner_id: Option<NationalId>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            species: species.into(),
            breed: breed.into(),
            birth_date,
            weight,
            status: PetStatus::Active,
            death_date: None,
            owner_id,
            memorial_notes: None,
        }
    }

    pub fn is_deceased(&self) -> bool {
        self.status == PetStatus::Deceased
    }

    /// Marks the pet DECEASED.
    ///
    /// An explicit `date` wins; otherwise an already recorded death date is
    /// kept, and only then does the date default to today.
    pub fn mark_deceased(&mut self, date: Option<NaiveDate>) {
        self.mark_deceased_at(date, today());
    }

    pub(crate) fn mark_deceased_at(&mut self, date: Option<NaiveDate>, today: NaiveDate) {
        self.status = PetStatus::Deceased;
        self.death_date = date.or(self.death_date).or(Some(today));
    }

    /// Marks the pet ACTIVE and clears its death date.
    pub fn mark_active(&mut self) {
        self.status = PetStatus::Active;
        self.death_date = None;
    }

    /// Applies `status`, keeping `death_date` consistent with it.
    pub fn set_status(&mut self, status: PetStatus, death_date: Option<NaiveDate>) {
        match status {
            PetStatus::Active => self.mark_active(),
            PetStatus::Deceased => self.mark_deceased(death_date),
        }
    }

    /// Replaces memorial notes from raw user input.
    pub fn set_memorial_notes(&mut self, input: &str) {
        self.memorial_notes = normalize_memorial_notes(input);
    }

    /// Owner key with blank text treated as "no owner set".
    pub fn owner_key(&self) -> Option<&str> {
        self.owner_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("pet", "name", &self.name)?;
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ValidationError::InvalidWeight(self.weight));
        }

        match (self.status, self.death_date) {
            (PetStatus::Active, Some(date)) => {
                return Err(ValidationError::ActiveWithDeathDate(date))
            }
            (PetStatus::Deceased, None) => return Err(ValidationError::DeceasedWithoutDeathDate),
            _ => {}
        }

        if let (Some(birth), Some(death)) = (self.birth_date, self.death_date) {
            if death < birth {
                return Err(ValidationError::DeathBeforeBirth { birth, death });
            }
        }

        Ok(())
    }
}

/// Normalizes memorial notes input.
///
/// Empty input and the `N/A` sentinel clear the notes.
pub fn normalize_memorial_notes(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(MEMORIAL_NOTES_CLEAR_SENTINEL) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes owner key input; blank text means no owner.
pub fn normalize_owner_id(input: &str) -> Option<NationalId> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Local calendar date used when a death date is not supplied.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
