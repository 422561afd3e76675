//! Pet owner record.

use super::{check_email, require_key, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// National identity document number used as owner/veterinarian key.
pub type NationalId = String;

/// Pet owner keyed by caller-supplied national id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub national_id: NationalId,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Owner {
    pub fn new(
        national_id: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            national_id: national_id.into(),
            name: name.into(),
            surname: surname.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// `name surname`, as printed by memorial and report views.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_key("owner", &self.national_id)?;
        require_text("owner", "name", &self.name)?;
        check_email(&self.email)
    }
}
