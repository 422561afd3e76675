//! Treatments submenu.

use super::Shell;
use std::io::{self, BufRead, Write};
use veteri_core::{PetId, Treatment, TreatmentId, TreatmentRepository};

const TREATMENTS_MENU: &[(&str, &str)] = &[
    ("1", "List treatments"),
    ("2", "Add treatment"),
    ("3", "Modify treatment"),
    ("4", "Delete treatment"),
    ("0", "Back"),
];

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn treatments_menu(&mut self) -> io::Result<()> {
        loop {
            match self.menu("Treatments", TREATMENTS_MENU)?.as_str() {
                "1" => self.list_treatments()?,
                "2" => self.add_treatment()?,
                "3" => self.modify_treatment()?,
                "4" => self.delete_treatment()?,
                "0" => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    fn list_treatments(&mut self) -> io::Result<()> {
        match self.treatments.list_treatments() {
            Ok(treatments) if treatments.is_empty() => {
                self.console.say("No treatments registered.")
            }
            Ok(treatments) => {
                for treatment in &treatments {
                    self.console.say(treatment)?;
                }
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }

    fn add_treatment(&mut self) -> io::Result<()> {
        let kind = self.console.required_text("Type")?;
        let description = self.console.text("Description")?;
        let date = self.console.date("Date (YYYY-MM-DD)", None)?;
        let observations = self.console.text("Observations")?;
        let pet_id: PetId = self.console.parsed("Pet id", "a numeric id")?;

        let mut treatment = Treatment::new(kind, description, date, observations, pet_id);
        match self.treatments.insert_treatment(&mut treatment) {
            Ok(_) => self.console.say(format_args!("Treatment added: {treatment}")),
            Err(err) => self.report_error(err),
        }
    }

    fn modify_treatment(&mut self) -> io::Result<()> {
        let id: TreatmentId = self
            .console
            .parsed("Id of the treatment to modify", "a numeric id")?;
        let mut treatment = match self.treatments.get_treatment(id) {
            Ok(Some(treatment)) => treatment,
            Ok(None) => return self.console.say(format_args!("Treatment {id} not found.")),
            Err(err) => return self.report_error(err),
        };

        treatment.kind = self.console.text_or("Type", &treatment.kind)?;
        treatment.description = self
            .console
            .text_or("Description", &treatment.description)?;
        treatment.date = self.console.date("Date (YYYY-MM-DD)", Some(treatment.date))?;
        treatment.observations = self
            .console
            .text_or("Observations", &treatment.observations)?;
        treatment.pet_id = self
            .console
            .parsed_or("Pet id", "a numeric id", treatment.pet_id)?;

        let result = self.treatments.update_treatment(&treatment);
        self.report_write(
            result,
            "Treatment updated.",
            format_args!("Treatment {id} not found."),
        )
    }

    fn delete_treatment(&mut self) -> io::Result<()> {
        let id: TreatmentId = self
            .console
            .parsed("Id of the treatment to delete", "a numeric id")?;
        let result = self.treatments.delete_treatment(id);
        self.report_write(
            result,
            "Treatment deleted.",
            format_args!("Treatment {id} not found."),
        )
    }
}
