//! Report use-cases.
//!
//! # Invariants
//! - The treatments-in-period report never returns an empty list: no matches
//!   yield exactly one [`PeriodReportEntry::NoMatches`] entry.
//! - Workload output keeps the repository order (count descending).

use crate::model::pet::PetId;
use crate::repo::report_repo::{
    PetTreatmentRow, ReportRepository, SqliteReportRepository, VeterinarianWorkload,
};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for report use-cases.
#[derive(Debug)]
pub enum ReportError {
    /// Range start is after range end.
    InvalidRange { start: NaiveDate, end: NaiveDate },
    Repo(RepoError),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "invalid date range: {start} is after {end}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidRange { .. } => None,
        }
    }
}

impl From<RepoError> for ReportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One line of the treatments-in-period report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodReportEntry {
    Treatment(PetTreatmentRow),
    /// Placeholder emitted instead of an empty result.
    NoMatches(String),
}

impl Display for PeriodReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Treatment(row) => {
                let treatment = &row.treatment;
                match treatment.id {
                    Some(id) => write!(f, "Treatment #{id}")?,
                    None => f.write_str("Treatment")?,
                }
                write!(
                    f,
                    ", type: {}, description: {}, date: {}, observations: {}, pet: {}, owner: {}",
                    treatment.kind,
                    treatment.description,
                    treatment.date,
                    treatment.observations,
                    row.pet_name,
                    row.owner_full_name().as_deref().unwrap_or("(none)")
                )
            }
            Self::NoMatches(message) => f.write_str(message),
        }
    }
}

/// Report service facade.
pub struct ReportService<R: ReportRepository> {
    repo: R,
}

impl<'conn> ReportService<SqliteReportRepository<'conn>> {
    pub fn with_connection(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(SqliteReportRepository::try_new(conn)?))
    }
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Every veterinarian with their assigned appointment count, busiest first.
    pub fn veterinarian_workload(&self) -> Result<Vec<VeterinarianWorkload>, ReportError> {
        Ok(self.repo.veterinarian_workload()?)
    }

    /// Treatments of `pet_id` dated within `[start, end]`.
    pub fn treatments_in_period(
        &self,
        pet_id: PetId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PeriodReportEntry>, ReportError> {
        if start > end {
            return Err(ReportError::InvalidRange { start, end });
        }

        let rows = self.repo.treatments_for_pet_between(pet_id, start, end)?;
        if rows.is_empty() {
            return Ok(vec![PeriodReportEntry::NoMatches(format!(
                "No treatments found for pet {pet_id} between {start} and {end}."
            ))]);
        }

        Ok(rows.into_iter().map(PeriodReportEntry::Treatment).collect())
    }
}
