//! Clinic domain model.
//!
//! # Responsibility
//! - Define the record shapes for owners, veterinarians, pets, appointments
//!   and treatments.
//! - Own field-level validation shared by repository write and read paths.
//!
//! # Invariants
//! - Optional columns are `Option<_>`; no sentinel values.
//! - Status enums persist as lowercase text and parse case-insensitively.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod appointment;
pub mod owner;
pub mod pet;
pub mod treatment;
pub mod veterinarian;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Field-level validation failure for clinic records.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
    /// Key text carries leading or trailing whitespace.
    PaddedKey {
        entity: &'static str,
        value: String,
    },
    /// Email text is present but not shaped like an address.
    InvalidEmail(String),
    /// Weight is negative, NaN or infinite.
    InvalidWeight(f64),
    /// ACTIVE pets must not carry a death date.
    ActiveWithDeathDate(NaiveDate),
    /// DECEASED pets must carry a death date.
    DeceasedWithoutDeathDate,
    /// Death date precedes birth date.
    DeathBeforeBirth {
        birth: NaiveDate,
        death: NaiveDate,
    },
    /// Operation needs a store-assigned id that the record does not have.
    MissingId(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be empty")
            }
            Self::PaddedKey { entity, value } => {
                write!(f, "{entity} key `{value}` has surrounding whitespace")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidWeight(value) => {
                write!(f, "weight must be a non-negative number, got {value}")
            }
            Self::ActiveWithDeathDate(date) => {
                write!(f, "active pet cannot have a death date ({date})")
            }
            Self::DeceasedWithoutDeathDate => write!(f, "deceased pet requires a death date"),
            Self::DeathBeforeBirth { birth, death } => write!(
                f,
                "death date {death} is earlier than birth date {birth}"
            ),
            Self::MissingId(entity) => write!(f, "{entity} has no store-assigned id yet"),
        }
    }
}

impl Error for ValidationError {}

/// Persisted status text that does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedStatus {
    /// Status family, e.g. `pet` or `appointment`.
    pub kind: &'static str,
    /// Raw text that failed to parse.
    pub value: String,
}

impl Display for UnrecognizedStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized {} status `{}`", self.kind, self.value)
    }
}

impl Error for UnrecognizedStatus {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}

/// National-id keys are stored verbatim, so they must be non-blank and trimmed.
pub(crate) fn require_key(entity: &'static str, value: &str) -> Result<(), ValidationError> {
    require_text(entity, "national_id", value)?;
    if value.trim() != value {
        return Err(ValidationError::PaddedKey {
            entity,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Checks email shape. Empty text is accepted; the field is optional contact data.
pub(crate) fn check_email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || EMAIL_RE.is_match(trimmed) {
        return Ok(());
    }
    Err(ValidationError::InvalidEmail(trimmed.to_string()))
}

/// Returns whether `value` looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}
