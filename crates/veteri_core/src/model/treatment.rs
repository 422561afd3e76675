//! Treatment record.

use super::pet::PetId;
use super::{require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned treatment identifier.
pub type TreatmentId = i64;

/// Treatment applied to one pet on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: Option<TreatmentId>,
    /// Serialized as `type` to match the table column.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub date: NaiveDate,
    pub observations: String,
    pub pet_id: PetId,
}

impl Treatment {
    pub fn new(
        kind: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        observations: impl Into<String>,
        pet_id: PetId,
    ) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            description: description.into(),
            date,
            observations: observations.into(),
            pet_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("treatment", "type", &self.kind)
    }
}

impl Display for Treatment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{id}")?,
            None => f.write_str("#-")?,
        }
        write!(
            f,
            " {} {} pet={} description={} observations={}",
            self.date, self.kind, self.pet_id, self.description, self.observations
        )
    }
}
