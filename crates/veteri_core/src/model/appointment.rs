//! Appointment record.

use super::pet::PetId;
use super::{require_text, UnrecognizedStatus, ValidationError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned appointment identifier.
pub type AppointmentId = i64;

/// Appointment lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => f.write_str("PENDING"),
            Self::Completed => f.write_str("COMPLETED"),
            Self::Cancelled => f.write_str("CANCELLED"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = UnrecognizedStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnrecognizedStatus {
                kind: "appointment",
                value: value.to_string(),
            }),
        }
    }
}

/// Scheduled visit for one pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Option<AppointmentId>,
    pub date_time: NaiveDateTime,
    pub reason: String,
    pub status: AppointmentStatus,
    pub pet_id: PetId,
}

impl Appointment {
    pub fn new(
        date_time: NaiveDateTime,
        reason: impl Into<String>,
        status: AppointmentStatus,
        pet_id: PetId,
    ) -> Self {
        Self {
            id: None,
            date_time,
            reason: reason.into(),
            status,
            pet_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("appointment", "reason", &self.reason)
    }
}

impl Display for Appointment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{id}")?,
            None => f.write_str("#-")?,
        }
        write!(
            f,
            " {} [{}] pet={} reason={}",
            self.date_time.format("%Y-%m-%d %H:%M"),
            self.status,
            self.pet_id,
            self.reason
        )
    }
}
