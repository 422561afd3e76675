//! Owners submenu.

use super::Shell;
use std::io::{self, BufRead, Write};
use veteri_core::{Owner, OwnerRepository};

const OWNERS_MENU: &[(&str, &str)] = &[
    ("1", "List owners"),
    ("2", "Add owner"),
    ("3", "Modify owner"),
    ("4", "Delete owner"),
    ("0", "Back"),
];

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn owners_menu(&mut self) -> io::Result<()> {
        loop {
            match self.menu("Owners", OWNERS_MENU)?.as_str() {
                "1" => self.list_owners()?,
                "2" => self.add_owner()?,
                "3" => self.modify_owner()?,
                "4" => self.delete_owner()?,
                "0" => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    fn list_owners(&mut self) -> io::Result<()> {
        match self.owners.list_owners() {
            Ok(owners) if owners.is_empty() => self.console.say("No owners registered."),
            Ok(owners) => {
                for owner in &owners {
                    self.console.say(owner_line(owner))?;
                }
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }

    fn add_owner(&mut self) -> io::Result<()> {
        let national_id = self.console.required_text("National id")?;
        let name = self.console.required_text("Name")?;
        let surname = self.console.text("Surname")?;
        let phone = self.console.text("Phone")?;
        let email = self.console.email("Email", None)?;
        let address = self.console.text("Address")?;

        let owner = Owner::new(national_id, name, surname, phone, email, address);
        let result = self.owners.insert_owner(&owner);
        self.report_write(result, "Owner added.", "Owner was not added.")
    }

    fn modify_owner(&mut self) -> io::Result<()> {
        let national_id = self.console.required_text("National id of the owner to modify")?;
        let mut owner = match self.owners.get_owner(&national_id) {
            Ok(Some(owner)) => owner,
            Ok(None) => {
                return self
                    .console
                    .say(format_args!("Owner {national_id} not found."))
            }
            Err(err) => return self.report_error(err),
        };

        owner.name = self.console.text_or("Name", &owner.name)?;
        owner.surname = self.console.text_or("Surname", &owner.surname)?;
        owner.phone = self.console.text_or("Phone", &owner.phone)?;
        owner.email = self.console.email("Email", Some(&owner.email))?;
        owner.address = self.console.text_or("Address", &owner.address)?;

        let result = self.owners.update_owner(&owner);
        self.report_write(
            result,
            "Owner updated.",
            format_args!("Owner {national_id} not found."),
        )
    }

    fn delete_owner(&mut self) -> io::Result<()> {
        let national_id = self.console.required_text("National id of the owner to delete")?;
        let result = self.owners.delete_owner(&national_id);
        self.report_write(
            result,
            "Owner deleted.",
            format_args!("Owner {national_id} not found."),
        )
    }
}

fn owner_line(owner: &Owner) -> String {
    format!(
        "{} | {} | phone: {} | email: {} | address: {}",
        owner.national_id,
        owner.full_name(),
        owner.phone,
        owner.email,
        owner.address
    )
}

#[cfg(test)]
mod tests {
    use crate::shell::tests::run_script;
    use veteri_core::db::open_db_in_memory;
    use veteri_core::{OwnerRepository, SqliteOwnerRepository};

    #[test]
    fn add_list_modify_and_delete_owner() {
        let conn = open_db_in_memory().unwrap();

        let output = run_script(
            &conn,
            "2\n\
             2\n12345678A\nAna\nRuiz\n600000000\nbad-email\na@x.com\nCalle 1\n\
             1\n\
             3\n12345678A\n\n\n611111111\n\n\n\
             0\n0\n",
        );
        assert!(output.contains("Owner added."));
        assert!(output.contains("12345678A | Ana Ruiz | phone: 600000000"));
        assert!(output.contains("Invalid value, expected an email address."));
        assert!(output.contains("Owner updated."));

        let owner = SqliteOwnerRepository::try_new(&conn)
            .unwrap()
            .get_owner("12345678A")
            .unwrap()
            .unwrap();
        assert_eq!(owner.phone, "611111111");
        assert_eq!(owner.email, "a@x.com");

        let output = run_script(&conn, "2\n4\n12345678A\n4\n12345678A\n0\n0\n");
        assert!(output.contains("Owner deleted."));
        assert!(output.contains("Owner 12345678A not found."));
    }

    #[test]
    fn duplicate_owner_reports_store_error() {
        let conn = open_db_in_memory().unwrap();
        let add = "2\n12345678A\nAna\n\n\n\n\n";

        let output = run_script(&conn, &format!("2\n{add}{add}0\n0\n"));
        assert_eq!(output.matches("Owner added.").count(), 1);
        assert!(output.contains("Error:"));
    }
}
