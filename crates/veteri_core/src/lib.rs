//! Core record keeping for a veterinary clinic.
//! Model invariants, SQLite persistence and memorial/report use-cases live here.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::appointment::{Appointment, AppointmentId, AppointmentStatus};
pub use model::owner::{NationalId, Owner};
pub use model::pet::{Pet, PetId, PetStatus};
pub use model::treatment::{Treatment, TreatmentId};
pub use model::veterinarian::Veterinarian;
pub use model::{UnrecognizedStatus, ValidationError};
pub use repo::appointment_repo::{AppointmentRepository, SqliteAppointmentRepository};
pub use repo::owner_repo::{OwnerRepository, SqliteOwnerRepository};
pub use repo::pet_repo::{PetRepository, SqlitePetRepository};
pub use repo::report_repo::{
    PetTreatmentRow, ReportRepository, SqliteReportRepository, VeterinarianWorkload,
};
pub use repo::treatment_repo::{SqliteTreatmentRepository, TreatmentRepository};
pub use repo::veterinarian_repo::{SqliteVeterinarianRepository, VeterinarianRepository};
pub use repo::{RepoError, RepoResult};
pub use service::appointment_service::{AppointmentService, Registration};
pub use service::memorial_service::{
    MemorialDetail, MemorialError, MemorialService, OwnerLookup, SqliteMemorialService,
    NO_MEMORIAL_NOTES,
};
pub use service::report_service::{PeriodReportEntry, ReportError, ReportService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
