//! Use-case services composed from repositories.
//!
//! # Responsibility
//! - Orchestrate repository calls into memorial, report and registration flows.
//! - Keep the shell decoupled from SQL details.

pub mod appointment_service;
pub mod memorial_service;
pub mod report_service;
