use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use veteri_core::db::open_db_in_memory;
use veteri_core::{
    Appointment, AppointmentRepository, AppointmentService, AppointmentStatus, Pet, PetId,
    PetRepository, RepoError, SqliteAppointmentRepository, SqlitePetRepository,
    SqliteTreatmentRepository, SqliteVeterinarianRepository, Treatment, TreatmentRepository,
    Veterinarian, VeterinarianRepository,
};

fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seed_pet(conn: &Connection) -> PetId {
    let repo = SqlitePetRepository::try_new(conn).unwrap();
    let mut pet = Pet::new("Toby", "Dog", "Beagle", None, 12.0, None);
    repo.insert_pet(&mut pet).unwrap();
    pet.id.unwrap()
}

fn seed_vets(conn: &Connection, ids: &[&str]) {
    let repo = SqliteVeterinarianRepository::try_new(conn).unwrap();
    for id in ids {
        repo.insert_veterinarian(&Veterinarian::new(*id, "Vet", *id, "General", "", ""))
            .unwrap();
    }
}

fn assignment_count(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM veterinarian_appointments;",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn appointment_crud_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    let repo = SqliteAppointmentRepository::try_new(&conn).unwrap();

    let mut appointment = Appointment::new(
        at("2025-02-10 09:30"),
        "Vaccination",
        AppointmentStatus::Pending,
        pet_id,
    );
    assert_eq!(repo.insert_appointment(&mut appointment).unwrap(), 1);
    let id = appointment.id.unwrap();
    assert_eq!(repo.get_appointment(id).unwrap(), Some(appointment.clone()));

    appointment.status = AppointmentStatus::Completed;
    assert_eq!(repo.update_appointment(&appointment).unwrap(), 1);
    assert_eq!(
        repo.get_appointment(id).unwrap().unwrap().status,
        AppointmentStatus::Completed
    );

    assert_eq!(repo.delete_appointment(id).unwrap(), 1);
    assert!(repo.list_appointments().unwrap().is_empty());
}

#[test]
fn appointment_for_unknown_pet_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAppointmentRepository::try_new(&conn).unwrap();

    let mut appointment = Appointment::new(
        at("2025-02-10 09:30"),
        "Checkup",
        AppointmentStatus::Pending,
        999,
    );
    let err = repo.insert_appointment(&mut appointment).unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
}

#[test]
fn register_with_veterinarians_assigns_each_once() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    seed_vets(&conn, &["111A", "222B"]);
    let repo = SqliteAppointmentRepository::try_new(&conn).unwrap();
    let service = AppointmentService::new(SqliteAppointmentRepository::try_new(&conn).unwrap());

    let registration = service
        .register_with_veterinarians(
            at("2025-03-01 10:00"),
            "Surgery follow-up",
            pet_id,
            &["222B".to_string(), " 111A ".to_string(), "222B".to_string()],
        )
        .unwrap();

    let id = registration.appointment.id.unwrap();
    assert_eq!(registration.appointment.status, AppointmentStatus::Pending);
    assert_eq!(registration.veterinarian_ids, vec!["111A", "222B"]);
    assert_eq!(
        repo.list_assigned_veterinarians(id).unwrap(),
        vec!["111A".to_string(), "222B".to_string()]
    );
}

#[test]
fn register_with_unknown_veterinarian_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    seed_vets(&conn, &["111A"]);
    let repo = SqliteAppointmentRepository::try_new(&conn).unwrap();

    let mut appointment = Appointment::new(
        at("2025-03-01 10:00"),
        "Checkup",
        AppointmentStatus::Pending,
        pet_id,
    );
    let err = repo
        .insert_with_veterinarians(&mut appointment, &["111A".into(), "999Z".into()])
        .unwrap_err();

    assert!(err.is_constraint_violation(), "unexpected error: {err}");
    assert_eq!(appointment.id, None);
    assert!(repo.list_appointments().unwrap().is_empty());
    assert_eq!(assignment_count(&conn), 0);
}

#[test]
fn register_without_veterinarians_creates_only_the_appointment() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    let repo = SqliteAppointmentRepository::try_new(&conn).unwrap();

    let mut appointment = Appointment::new(
        at("2025-03-01 10:00"),
        "Checkup",
        AppointmentStatus::Pending,
        pet_id,
    );
    assert_eq!(
        repo.insert_with_veterinarians(&mut appointment, &[]).unwrap(),
        1
    );
    assert_eq!(repo.list_appointments().unwrap().len(), 1);
}

#[test]
fn deleting_appointment_or_veterinarian_cascades_assignments() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    seed_vets(&conn, &["111A", "222B"]);
    let appointments = SqliteAppointmentRepository::try_new(&conn).unwrap();
    let vets = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    let mut first = Appointment::new(at("2025-03-01 10:00"), "A", AppointmentStatus::Pending, pet_id);
    let mut second = Appointment::new(at("2025-03-02 10:00"), "B", AppointmentStatus::Pending, pet_id);
    appointments
        .insert_with_veterinarians(&mut first, &["111A".into(), "222B".into()])
        .unwrap();
    appointments
        .insert_with_veterinarians(&mut second, &["111A".into()])
        .unwrap();
    assert_eq!(assignment_count(&conn), 3);

    appointments.delete_appointment(first.id.unwrap()).unwrap();
    assert_eq!(assignment_count(&conn), 1);

    vets.delete_veterinarian("111A").unwrap();
    assert_eq!(assignment_count(&conn), 0);
    assert!(appointments
        .list_assigned_veterinarians(second.id.unwrap())
        .unwrap()
        .is_empty());
}

#[test]
fn deleting_pet_with_history_fails() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    let treatments = SqliteTreatmentRepository::try_new(&conn).unwrap();
    let pets = SqlitePetRepository::try_new(&conn).unwrap();

    let mut treatment = Treatment::new("Vaccine", "Rabies", date(2025, 1, 10), "", pet_id);
    treatments.insert_treatment(&mut treatment).unwrap();

    let err = pets.delete_pet(pet_id).unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
    assert!(pets.get_pet(pet_id).unwrap().is_some());
}

#[test]
fn treatment_crud_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    let repo = SqliteTreatmentRepository::try_new(&conn).unwrap();

    let mut treatment = Treatment::new(
        "Deworming",
        "Oral tablet",
        date(2025, 1, 10),
        "Repeat in 3 months",
        pet_id,
    );
    assert_eq!(repo.insert_treatment(&mut treatment).unwrap(), 1);
    let id = treatment.id.unwrap();
    assert_eq!(repo.get_treatment(id).unwrap(), Some(treatment.clone()));

    treatment.observations = "Done".to_string();
    assert_eq!(repo.update_treatment(&treatment).unwrap(), 1);
    assert_eq!(
        repo.get_treatment(id).unwrap().unwrap().observations,
        "Done"
    );

    assert_eq!(repo.delete_treatment(id).unwrap(), 1);
    assert_eq!(repo.get_treatment(id).unwrap(), None);
}

#[test]
fn blank_treatment_type_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    let repo = SqliteTreatmentRepository::try_new(&conn).unwrap();

    let mut treatment = Treatment::new(" ", "", date(2025, 1, 10), "", pet_id);
    assert!(matches!(
        repo.insert_treatment(&mut treatment),
        Err(RepoError::Validation(_))
    ));
}

#[test]
fn update_missing_appointment_affects_zero_rows_and_keeps_count() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    let repo = SqliteAppointmentRepository::try_new(&conn).unwrap();
    let mut kept = Appointment::new(
        at("2025-02-10 09:30"),
        "Vaccination",
        AppointmentStatus::Pending,
        pet_id,
    );
    repo.insert_appointment(&mut kept).unwrap();

    let mut ghost = kept.clone();
    ghost.id = Some(4242);
    ghost.reason = "Never stored".to_string();
    assert_eq!(repo.update_appointment(&ghost).unwrap(), 0);
    assert_eq!(repo.list_appointments().unwrap().len(), 1);
    assert_eq!(repo.get_appointment(kept.id.unwrap()).unwrap(), Some(kept));
}

#[test]
fn update_missing_treatment_affects_zero_rows_and_keeps_count() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    let repo = SqliteTreatmentRepository::try_new(&conn).unwrap();
    let mut kept = Treatment::new("Deworming", "", date(2025, 1, 10), "", pet_id);
    repo.insert_treatment(&mut kept).unwrap();

    let mut ghost = kept.clone();
    ghost.id = Some(4242);
    assert_eq!(repo.update_treatment(&ghost).unwrap(), 0);
    assert_eq!(repo.list_treatments().unwrap().len(), 1);
}

#[test]
fn undecodable_treatment_date_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let pet_id = seed_pet(&conn);
    conn.execute(
        "INSERT INTO treatments (type, date, pet_id) VALUES ('Deworming', 'tomorrow', ?1);",
        [pet_id],
    )
    .unwrap();
    let repo = SqliteTreatmentRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.list_treatments(),
        Err(RepoError::InvalidData(_))
    ));
}
