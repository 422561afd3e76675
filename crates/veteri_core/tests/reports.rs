use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use veteri_core::db::open_db_in_memory;
use veteri_core::{
    Appointment, AppointmentRepository, AppointmentStatus, Owner, OwnerRepository,
    PeriodReportEntry, Pet, PetId, PetRepository, ReportError, ReportService,
    SqliteAppointmentRepository, SqliteOwnerRepository, SqlitePetRepository,
    SqliteTreatmentRepository, SqliteVeterinarianRepository, Treatment, TreatmentRepository,
    Veterinarian, VeterinarianRepository,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").unwrap()
}

fn seed_owned_pet(conn: &Connection) -> PetId {
    SqliteOwnerRepository::try_new(conn)
        .unwrap()
        .insert_owner(&Owner::new("12345678A", "Ana", "Ruiz", "", "", ""))
        .unwrap();
    let mut pet = Pet::new("Toby", "Dog", "Beagle", None, 12.0, Some("12345678A".into()));
    SqlitePetRepository::try_new(conn)
        .unwrap()
        .insert_pet(&mut pet)
        .unwrap();
    pet.id.unwrap()
}

fn add_treatment(conn: &Connection, pet_id: PetId, kind: &str, on: NaiveDate) -> Treatment {
    let mut treatment = Treatment::new(kind, "desc", on, "obs", pet_id);
    SqliteTreatmentRepository::try_new(conn)
        .unwrap()
        .insert_treatment(&mut treatment)
        .unwrap();
    treatment
}

#[test]
fn period_report_includes_only_treatments_in_range_with_names() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_owned_pet(&conn);
    let inside = add_treatment(&conn, pet_id, "Vaccine", date(2025, 1, 10));
    add_treatment(&conn, pet_id, "Surgery", date(2025, 6, 1));
    let service = ReportService::with_connection(&conn).unwrap();

    let entries = service
        .treatments_in_period(pet_id, date(2025, 1, 1), date(2025, 3, 1))
        .unwrap();

    assert_eq!(entries.len(), 1);
    match &entries[0] {
        PeriodReportEntry::Treatment(row) => {
            assert_eq!(row.treatment, inside);
            assert_eq!(row.pet_name, "Toby");
            assert_eq!(row.owner_full_name().as_deref(), Some("Ana Ruiz"));
        }
        other => panic!("unexpected entry: {other:?}"),
    }
}

#[test]
fn period_report_bounds_are_inclusive_and_ordered_by_date() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_owned_pet(&conn);
    add_treatment(&conn, pet_id, "Last", date(2025, 3, 1));
    add_treatment(&conn, pet_id, "First", date(2025, 1, 1));
    let service = ReportService::with_connection(&conn).unwrap();

    let kinds: Vec<String> = service
        .treatments_in_period(pet_id, date(2025, 1, 1), date(2025, 3, 1))
        .unwrap()
        .into_iter()
        .map(|entry| match entry {
            PeriodReportEntry::Treatment(row) => row.treatment.kind,
            PeriodReportEntry::NoMatches(message) => panic!("unexpected placeholder: {message}"),
        })
        .collect();
    assert_eq!(kinds, vec!["First", "Last"]);
}

#[test]
fn period_report_without_matches_yields_single_placeholder() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_owned_pet(&conn);
    add_treatment(&conn, pet_id, "Surgery", date(2025, 6, 1));
    let service = ReportService::with_connection(&conn).unwrap();

    let entries = service
        .treatments_in_period(pet_id, date(2025, 1, 1), date(2025, 3, 1))
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert!(matches!(entries[0], PeriodReportEntry::NoMatches(_)));
    assert!(entries[0].to_string().starts_with("No treatments found"));
}

#[test]
fn period_report_rejects_reversed_range() {
    let conn = open_db_in_memory().unwrap();
    let service = ReportService::with_connection(&conn).unwrap();

    assert!(matches!(
        service.treatments_in_period(1, date(2025, 3, 1), date(2025, 1, 1)),
        Err(ReportError::InvalidRange { .. })
    ));
}

#[test]
fn workload_counts_assignments_busiest_first_including_idle_vets() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_owned_pet(&conn);
    let vets = SqliteVeterinarianRepository::try_new(&conn).unwrap();
    for (id, name) in [("111A", "Marta"), ("222B", "Luis"), ("333C", "Sara")] {
        vets.insert_veterinarian(&Veterinarian::new(id, name, "Gil", "General", "", ""))
            .unwrap();
    }
    let appointments = SqliteAppointmentRepository::try_new(&conn).unwrap();
    for (when, assigned) in [
        ("2025-01-01 09:00", vec!["222B".to_string()]),
        ("2025-01-02 09:00", vec!["222B".to_string(), "111A".to_string()]),
    ] {
        let mut appointment =
            Appointment::new(at(when), "Checkup", AppointmentStatus::Pending, pet_id);
        appointments
            .insert_with_veterinarians(&mut appointment, &assigned)
            .unwrap();
    }
    let service = ReportService::with_connection(&conn).unwrap();

    let workload = service.veterinarian_workload().unwrap();
    let summary: Vec<(&str, u32)> = workload
        .iter()
        .map(|row| (row.national_id.as_str(), row.appointment_count))
        .collect();
    assert_eq!(summary, vec![("222B", 2), ("111A", 1), ("333C", 0)]);
}

#[test]
fn workload_is_empty_without_veterinarians() {
    let conn = open_db_in_memory().unwrap();
    let service = ReportService::with_connection(&conn).unwrap();

    assert!(service.veterinarian_workload().unwrap().is_empty());
}
