//! Veterinarians submenu.

use super::Shell;
use std::io::{self, BufRead, Write};
use veteri_core::{Veterinarian, VeterinarianRepository};

const VETERINARIANS_MENU: &[(&str, &str)] = &[
    ("1", "List veterinarians"),
    ("2", "Add veterinarian"),
    ("3", "Modify veterinarian"),
    ("4", "Delete veterinarian"),
    ("0", "Back"),
];

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn veterinarians_menu(&mut self) -> io::Result<()> {
        loop {
            match self.menu("Veterinarians", VETERINARIANS_MENU)?.as_str() {
                "1" => self.list_veterinarians()?,
                "2" => self.add_veterinarian()?,
                "3" => self.modify_veterinarian()?,
                "4" => self.delete_veterinarian()?,
                "0" => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    fn list_veterinarians(&mut self) -> io::Result<()> {
        match self.veterinarians.list_veterinarians() {
            Ok(vets) if vets.is_empty() => self.console.say("No veterinarians registered."),
            Ok(vets) => {
                for vet in &vets {
                    self.console.say(format_args!(
                        "{} | {} | specialty: {} | phone: {} | email: {}",
                        vet.national_id,
                        vet.full_name(),
                        vet.specialty,
                        vet.phone,
                        vet.email
                    ))?;
                }
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }

    fn add_veterinarian(&mut self) -> io::Result<()> {
        let national_id = self.console.required_text("National id")?;
        let name = self.console.required_text("Name")?;
        let surname = self.console.text("Surname")?;
        let specialty = self.console.text("Specialty")?;
        let phone = self.console.text("Phone")?;
        let email = self.console.email("Email", None)?;

        let vet = Veterinarian::new(national_id, name, surname, specialty, phone, email);
        let result = self.veterinarians.insert_veterinarian(&vet);
        self.report_write(result, "Veterinarian added.", "Veterinarian was not added.")
    }

    fn modify_veterinarian(&mut self) -> io::Result<()> {
        let national_id = self
            .console
            .required_text("National id of the veterinarian to modify")?;
        let mut vet = match self.veterinarians.get_veterinarian(&national_id) {
            Ok(Some(vet)) => vet,
            Ok(None) => {
                return self
                    .console
                    .say(format_args!("Veterinarian {national_id} not found."))
            }
            Err(err) => return self.report_error(err),
        };

        vet.name = self.console.text_or("Name", &vet.name)?;
        vet.surname = self.console.text_or("Surname", &vet.surname)?;
        vet.specialty = self.console.text_or("Specialty", &vet.specialty)?;
        vet.phone = self.console.text_or("Phone", &vet.phone)?;
        vet.email = self.console.email("Email", Some(&vet.email))?;

        let result = self.veterinarians.update_veterinarian(&vet);
        self.report_write(
            result,
            "Veterinarian updated.",
            format_args!("Veterinarian {national_id} not found."),
        )
    }

    fn delete_veterinarian(&mut self) -> io::Result<()> {
        let national_id = self
            .console
            .required_text("National id of the veterinarian to delete")?;
        let result = self.veterinarians.delete_veterinarian(&national_id);
        self.report_write(
            result,
            "Veterinarian deleted.",
            format_args!("Veterinarian {national_id} not found."),
        )
    }
}
