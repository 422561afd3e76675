//! Interactive menu shell.
//!
//! # Responsibility
//! - Present the main menu and per-entity submenus.
//! - Print every outcome, including store failures, and keep looping.
//!
//! # Invariants
//! - The shell never terminates on a repository error.
//! - Option `0` or end of input leaves the current menu.

mod appointments;
mod console;
mod memorial;
mod owners;
mod pets;
mod reports;
mod treatments;
mod veterinarians;

use console::{is_end_of_input, Console};
use log::info;
use rusqlite::Connection;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use veteri_core::{
    AppointmentService, RepoResult, ReportService, SqliteAppointmentRepository,
    SqliteMemorialService, SqliteOwnerRepository, SqlitePetRepository, SqliteReportRepository,
    SqliteTreatmentRepository, SqliteVeterinarianRepository,
};

const MAIN_MENU: &[(&str, &str)] = &[
    ("1", "Pets"),
    ("2", "Owners"),
    ("3", "Veterinarians"),
    ("4", "Appointments"),
    ("5", "Treatments"),
    ("6", "Memorial"),
    ("7", "Reports"),
    ("0", "Exit"),
];

/// Menu shell bound to one open clinic database.
pub struct Shell<'conn, R, W> {
    console: Console<R, W>,
    owners: SqliteOwnerRepository<'conn>,
    veterinarians: SqliteVeterinarianRepository<'conn>,
    pets: SqlitePetRepository<'conn>,
    appointments: SqliteAppointmentRepository<'conn>,
    treatments: SqliteTreatmentRepository<'conn>,
    memorial: SqliteMemorialService<'conn>,
    reports: ReportService<SqliteReportRepository<'conn>>,
    registration: AppointmentService<SqliteAppointmentRepository<'conn>>,
}

impl<'conn, R: BufRead, W: Write> Shell<'conn, R, W> {
    /// Builds every repository up front; fails if `conn` is not migrated.
    pub fn new(conn: &'conn Connection, input: R, output: W) -> RepoResult<Self> {
        Ok(Self {
            console: Console::new(input, output),
            owners: SqliteOwnerRepository::try_new(conn)?,
            veterinarians: SqliteVeterinarianRepository::try_new(conn)?,
            pets: SqlitePetRepository::try_new(conn)?,
            appointments: SqliteAppointmentRepository::try_new(conn)?,
            treatments: SqliteTreatmentRepository::try_new(conn)?,
            memorial: SqliteMemorialService::with_connection(conn)?,
            reports: ReportService::with_connection(conn)?,
            registration: AppointmentService::new(SqliteAppointmentRepository::try_new(conn)?),
        })
    }

    /// Runs the main menu until `0` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        info!("event=shell_start module=cli status=ok");
        self.console.say("VeteriApp - clinic records")?;

        loop {
            let choice = match self.menu("Main menu", MAIN_MENU) {
                Ok(choice) => choice,
                Err(err) if is_end_of_input(&err) => break,
                Err(err) => return Err(err),
            };

            let outcome = match choice.as_str() {
                "1" => self.pets_menu(),
                "2" => self.owners_menu(),
                "3" => self.veterinarians_menu(),
                "4" => self.appointments_menu(),
                "5" => self.treatments_menu(),
                "6" => self.memorial_menu(),
                "7" => self.reports_menu(),
                "0" => break,
                _ => self.invalid_option(),
            };

            match outcome {
                Ok(()) => {}
                Err(err) if is_end_of_input(&err) => break,
                Err(err) => return Err(err),
            }
        }

        self.console.say("Goodbye.")?;
        info!("event=shell_exit module=cli status=ok");
        Ok(())
    }

    /// Prints `options` under `title` and reads the selection.
    fn menu(&mut self, title: &str, options: &[(&str, &str)]) -> io::Result<String> {
        self.console.say("")?;
        self.console.say(format_args!("== {title} =="))?;
        for (key, label) in options {
            self.console.say(format_args!("{key}. {label}"))?;
        }
        self.console.line("Select an option: ")
    }

    fn invalid_option(&mut self) -> io::Result<()> {
        self.console.say("Invalid option, try again.")
    }

    /// Prints a write outcome; zero rows means the key matched nothing.
    fn report_write<E: Display>(
        &mut self,
        result: Result<usize, E>,
        done: impl Display,
        missing: impl Display,
    ) -> io::Result<()> {
        match result {
            Ok(0) => self.console.say(missing),
            Ok(_) => self.console.say(done),
            Err(err) => self.report_error(err),
        }
    }

    fn report_error(&mut self, err: impl Display) -> io::Result<()> {
        self.console.say(format_args!("Error: {err}"))
    }
}
