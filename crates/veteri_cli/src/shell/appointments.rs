//! Appointments submenu.

use super::Shell;
use std::io::{self, BufRead, Write};
use veteri_core::{
    Appointment, AppointmentId, AppointmentRepository, AppointmentStatus, PetId,
};

const APPOINTMENTS_MENU: &[(&str, &str)] = &[
    ("1", "List appointments"),
    ("2", "Add appointment"),
    ("3", "Modify appointment"),
    ("4", "Delete appointment"),
    ("0", "Back"),
];

const STATUS_HINT: &str = "PENDING, COMPLETED or CANCELLED";

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn appointments_menu(&mut self) -> io::Result<()> {
        loop {
            match self.menu("Appointments", APPOINTMENTS_MENU)?.as_str() {
                "1" => self.list_appointments()?,
                "2" => self.add_appointment()?,
                "3" => self.modify_appointment()?,
                "4" => self.delete_appointment()?,
                "0" => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    fn list_appointments(&mut self) -> io::Result<()> {
        let appointments = match self.appointments.list_appointments() {
            Ok(appointments) => appointments,
            Err(err) => return self.report_error(err),
        };
        if appointments.is_empty() {
            return self.console.say("No appointments registered.");
        }

        for appointment in &appointments {
            self.console.say(appointment)?;
            let Some(id) = appointment.id else {
                continue;
            };
            match self.appointments.list_assigned_veterinarians(id) {
                Ok(vets) if vets.is_empty() => {}
                Ok(vets) => self
                    .console
                    .say(format_args!("    veterinarians: {}", vets.join(", ")))?,
                Err(err) => self.report_error(err)?,
            }
        }
        Ok(())
    }

    fn add_appointment(&mut self) -> io::Result<()> {
        let date_time = self
            .console
            .date_time("Date and time (YYYY-MM-DD HH:MM)", None)?;
        let reason = self.console.required_text("Reason")?;
        let status: AppointmentStatus = self
            .console
            .parsed_or("Status", STATUS_HINT, AppointmentStatus::Pending)?;
        let pet_id: PetId = self.console.parsed("Pet id", "a numeric id")?;

        let mut appointment = Appointment::new(date_time, reason, status, pet_id);
        match self.appointments.insert_appointment(&mut appointment) {
            Ok(_) => self.console.say(format_args!("Appointment added: {appointment}")),
            Err(err) => self.report_error(err),
        }
    }

    fn modify_appointment(&mut self) -> io::Result<()> {
        let id: AppointmentId = self
            .console
            .parsed("Id of the appointment to modify", "a numeric id")?;
        let mut appointment = match self.appointments.get_appointment(id) {
            Ok(Some(appointment)) => appointment,
            Ok(None) => return self.console.say(format_args!("Appointment {id} not found.")),
            Err(err) => return self.report_error(err),
        };

        appointment.date_time = self.console.date_time(
            "Date and time (YYYY-MM-DD HH:MM)",
            Some(appointment.date_time),
        )?;
        appointment.reason = self.console.text_or("Reason", &appointment.reason)?;
        appointment.status = self
            .console
            .parsed_or("Status", STATUS_HINT, appointment.status)?;
        appointment.pet_id = self
            .console
            .parsed_or("Pet id", "a numeric id", appointment.pet_id)?;

        let result = self.appointments.update_appointment(&appointment);
        self.report_write(
            result,
            "Appointment updated.",
            format_args!("Appointment {id} not found."),
        )
    }

    fn delete_appointment(&mut self) -> io::Result<()> {
        let id: AppointmentId = self
            .console
            .parsed("Id of the appointment to delete", "a numeric id")?;
        let result = self.appointments.delete_appointment(id);
        self.report_write(
            result,
            "Appointment deleted.",
            format_args!("Appointment {id} not found."),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::shell::tests::run_script;
    use veteri_core::db::open_db_in_memory;
    use veteri_core::{AppointmentRepository, AppointmentStatus, SqliteAppointmentRepository};

    #[test]
    fn add_and_modify_appointment_status() {
        let conn = open_db_in_memory().unwrap();

        let output = run_script(
            &conn,
            "1\n2\nToby\n\n\n\n10\n\n0\n\
             4\n2\n2025-02-10\n2025-02-10 09:30\nVaccination\n\n1\n\
             3\n1\n\n\nunknown\ncompleted\n\n\
             1\n0\n0\n",
        );
        assert!(output.contains("Invalid value, expected a date-time as YYYY-MM-DD HH:MM."));
        assert!(output.contains("Appointment added: #1 2025-02-10 09:30 [PENDING] pet=1"));
        assert!(output.contains("Invalid value, expected PENDING, COMPLETED or CANCELLED."));
        assert!(output.contains("Appointment updated."));

        let appointment = SqliteAppointmentRepository::try_new(&conn)
            .unwrap()
            .get_appointment(1)
            .unwrap()
            .unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Completed);
    }
}
