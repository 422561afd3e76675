//! Reports submenu: workload, treatments in a period, and appointment
//! registration with assigned veterinarians.

use super::Shell;
use std::io::{self, BufRead, Write};
use veteri_core::service::appointment_service::parse_veterinarian_ids;
use veteri_core::PetId;

const REPORTS_MENU: &[(&str, &str)] = &[
    ("1", "Veterinarian workload"),
    ("2", "Treatments for a pet in a period"),
    ("3", "Register appointment with veterinarians"),
    ("0", "Back"),
];

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn reports_menu(&mut self) -> io::Result<()> {
        loop {
            match self.menu("Reports", REPORTS_MENU)?.as_str() {
                "1" => self.workload_report()?,
                "2" => self.period_report()?,
                "3" => self.register_appointment()?,
                "0" => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    fn workload_report(&mut self) -> io::Result<()> {
        match self.reports.veterinarian_workload() {
            Ok(rows) if rows.is_empty() => self.console.say("No veterinarians registered."),
            Ok(rows) => {
                for row in &rows {
                    self.console.say(format_args!(
                        "{} | {} {} | {} | appointments: {}",
                        row.national_id, row.name, row.surname, row.specialty, row.appointment_count
                    ))?;
                }
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }

    fn period_report(&mut self) -> io::Result<()> {
        let pet_id: PetId = self.console.parsed("Pet id", "a numeric id")?;
        let start = self.console.date("Start date (YYYY-MM-DD)", None)?;
        let end = self.console.date("End date (YYYY-MM-DD)", None)?;

        match self.reports.treatments_in_period(pet_id, start, end) {
            Ok(entries) => {
                for entry in &entries {
                    self.console.say(entry)?;
                }
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }

    fn register_appointment(&mut self) -> io::Result<()> {
        let date_time = self
            .console
            .date_time("Date and time (YYYY-MM-DD HH:MM)", None)?;
        let reason = self.console.required_text("Reason")?;
        let pet_id: PetId = self.console.parsed("Pet id", "a numeric id")?;
        let vet_input = self
            .console
            .text("Veterinarian national ids (comma separated)")?;
        let veterinarian_ids = parse_veterinarian_ids(&vet_input);

        match self
            .registration
            .register_with_veterinarians(date_time, reason, pet_id, &veterinarian_ids)
        {
            Ok(registration) => {
                self.console
                    .say(format_args!("Appointment registered: {}", registration.appointment))?;
                if registration.veterinarian_ids.is_empty() {
                    self.console.say("No veterinarians assigned.")
                } else {
                    self.console.say(format_args!(
                        "Assigned veterinarians: {}",
                        registration.veterinarian_ids.join(", ")
                    ))
                }
            }
            Err(err) => self.report_error(err),
        }
    }
}
