//! Pets submenu, including the ACTIVE/DECEASED transition.

use super::console::CLEAR_INPUT;
use super::Shell;
use std::io::{self, BufRead, Write};
use veteri_core::model::pet::normalize_owner_id;
use veteri_core::{Pet, PetId, PetRepository, PetStatus};

const PETS_MENU: &[(&str, &str)] = &[
    ("1", "List pets"),
    ("2", "Add pet"),
    ("3", "Modify pet"),
    ("4", "Delete pet"),
    ("0", "Back"),
];

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn pets_menu(&mut self) -> io::Result<()> {
        loop {
            match self.menu("Pets", PETS_MENU)?.as_str() {
                "1" => self.list_pets()?,
                "2" => self.add_pet()?,
                "3" => self.modify_pet()?,
                "4" => self.delete_pet()?,
                "0" => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    fn list_pets(&mut self) -> io::Result<()> {
        match self.pets.list_pets() {
            Ok(pets) if pets.is_empty() => self.console.say("No pets registered."),
            Ok(pets) => {
                for pet in &pets {
                    self.console.say(pet_line(pet))?;
                }
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }

    fn add_pet(&mut self) -> io::Result<()> {
        let name = self.console.required_text("Name")?;
        let species = self.console.text("Species")?;
        let breed = self.console.text("Breed")?;
        let birth_date = self
            .console
            .optional_date("Birth date (YYYY-MM-DD)", None)?;
        let weight = self.console.weight("Weight (kg)", None)?;
        let owner_input = self.console.text("Owner national id (empty for none)")?;
        let owner_id = normalize_owner_id(&owner_input);

        let mut pet = Pet::new(name, species, breed, birth_date, weight, owner_id);
        match self.pets.insert_pet(&mut pet) {
            Ok(_) => self.console.say(format_args!(
                "Pet added with id {}.",
                pet.id.map_or_else(|| "?".to_string(), |id| id.to_string())
            )),
            Err(err) => self.report_error(err),
        }
    }

    fn modify_pet(&mut self) -> io::Result<()> {
        let id: PetId = self.console.parsed("Id of the pet to modify", "a numeric id")?;
        let mut pet = match self.pets.get_pet(id) {
            Ok(Some(pet)) => pet,
            Ok(None) => return self.console.say(format_args!("Pet {id} not found.")),
            Err(err) => return self.report_error(err),
        };

        pet.name = self.console.text_or("Name", &pet.name)?;
        pet.species = self.console.text_or("Species", &pet.species)?;
        pet.breed = self.console.text_or("Breed", &pet.breed)?;
        pet.birth_date = self
            .console
            .clearable_date("Birth date (YYYY-MM-DD)", pet.birth_date)?;
        pet.weight = self.console.weight("Weight (kg)", Some(pet.weight))?;

        let status: PetStatus = self.console.parsed_or(
            "Status (ACTIVE/DECEASED)",
            "ACTIVE or DECEASED",
            pet.status,
        )?;
        let death_date = match status {
            PetStatus::Deceased => self.console.optional_date(
                "Death date (YYYY-MM-DD, empty keeps or uses today)",
                pet.death_date,
            )?,
            PetStatus::Active => None,
        };
        pet.set_status(status, death_date);

        let shown = pet.owner_id.clone().unwrap_or_else(|| "none".to_string());
        let owner_input = self.console.line(&format!(
            "Owner national id, {CLEAR_INPUT} for none [{shown}]: "
        ))?;
        if owner_input == CLEAR_INPUT {
            pet.owner_id = None;
        } else if !owner_input.is_empty() {
            pet.owner_id = normalize_owner_id(&owner_input);
        }

        let result = self.pets.update_pet(&pet);
        self.report_write(result, "Pet updated.", format_args!("Pet {id} not found."))
    }

    fn delete_pet(&mut self) -> io::Result<()> {
        let id: PetId = self.console.parsed("Id of the pet to delete", "a numeric id")?;
        let result = self.pets.delete_pet(id);
        self.report_write(result, "Pet deleted.", format_args!("Pet {id} not found."))
    }
}

pub(super) fn pet_line(pet: &Pet) -> String {
    let mut line = format!(
        "#{} {} | {} {} | born: {} | {} kg | {}",
        pet.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
        pet.name,
        pet.species,
        pet.breed,
        pet.birth_date
            .map_or_else(|| "unknown".to_string(), |date| date.to_string()),
        pet.weight,
        pet.status
    );
    if let Some(death_date) = pet.death_date {
        line.push_str(&format!(" ({death_date})"));
    }
    line.push_str(&format!(" | owner: {}", pet.owner_key().unwrap_or("none")));
    line
}
