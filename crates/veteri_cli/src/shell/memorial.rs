//! Memorial submenu for deceased pets.

use super::pets::pet_line;
use super::Shell;
use std::io::{self, BufRead, Write};
use veteri_core::model::pet::MEMORIAL_NOTES_CLEAR_SENTINEL;
use veteri_core::{MemorialDetail, OwnerLookup, PetId};

const MEMORIAL_MENU: &[(&str, &str)] = &[
    ("1", "List deceased pets"),
    ("2", "View memorial"),
    ("3", "Edit memorial notes"),
    ("0", "Back"),
];

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn memorial_menu(&mut self) -> io::Result<()> {
        loop {
            match self.menu("Memorial", MEMORIAL_MENU)?.as_str() {
                "1" => self.list_deceased()?,
                "2" => self.view_memorial()?,
                "3" => self.edit_memorial_notes()?,
                "0" => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    fn list_deceased(&mut self) -> io::Result<()> {
        match self.memorial.list_deceased() {
            Ok(pets) if pets.is_empty() => self.console.say("No deceased pets registered."),
            Ok(pets) => {
                for pet in &pets {
                    self.console.say(pet_line(pet))?;
                }
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }

    fn view_memorial(&mut self) -> io::Result<()> {
        let pet_id: PetId = self.console.parsed("Pet id", "a numeric id")?;
        match self.memorial.memorial_detail(pet_id) {
            Ok(detail) => self.print_memorial(&detail),
            Err(err) => self.report_error(err),
        }
    }

    fn print_memorial(&mut self, detail: &MemorialDetail) -> io::Result<()> {
        let pet = &detail.pet;
        self.console.say(format_args!("-- In memory of {} --", pet.name))?;
        self.console.say(pet_line(pet))?;

        match &detail.owner {
            OwnerLookup::Found(owner) => self.console.say(format_args!(
                "Owner: {} ({}) | phone: {} | email: {}",
                owner.full_name(),
                owner.national_id,
                owner.phone,
                owner.email
            ))?,
            OwnerLookup::Missing(national_id) => self.console.say(format_args!(
                "Owner: {national_id} (no owner record found)"
            ))?,
            OwnerLookup::NotSet => self.console.say("Owner: not registered")?,
        }

        self.console
            .say(format_args!("Memorial notes: {}", detail.notes_or_marker()))?;

        self.console.say("Appointments:")?;
        if detail.appointments.is_empty() {
            self.console.say("  (none)")?;
        }
        for appointment in &detail.appointments {
            self.console.say(format_args!("  {appointment}"))?;
        }

        self.console.say("Treatments:")?;
        if detail.treatments.is_empty() {
            self.console.say("  (none)")?;
        }
        for treatment in &detail.treatments {
            self.console.say(format_args!("  {treatment}"))?;
        }
        Ok(())
    }

    fn edit_memorial_notes(&mut self) -> io::Result<()> {
        let pet_id: PetId = self.console.parsed("Pet id", "a numeric id")?;
        let notes = self.console.text(&format!(
            "Memorial notes (empty or {MEMORIAL_NOTES_CLEAR_SENTINEL} clears)"
        ))?;
        match self.memorial.update_notes(pet_id, &notes) {
            Ok(pet) if pet.memorial_notes.is_some() => {
                self.console.say("Memorial notes updated.")
            }
            Ok(_) => self.console.say("Memorial notes cleared."),
            Err(err) => self.report_error(err),
        }
    }
}
