//! Veterinarian staff record.

use super::owner::NationalId;
use super::{check_email, require_key, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Clinic veterinarian keyed by national id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Veterinarian {
    pub national_id: NationalId,
    pub name: String,
    pub surname: String,
    pub specialty: String,
    pub phone: String,
    pub email: String,
}

impl Veterinarian {
    pub fn new(
        national_id: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        specialty: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            national_id: national_id.into(),
            name: name.into(),
            surname: surname.into(),
            specialty: specialty.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_key("veterinarian", &self.national_id)?;
        require_text("veterinarian", "name", &self.name)?;
        check_email(&self.email)
    }
}
