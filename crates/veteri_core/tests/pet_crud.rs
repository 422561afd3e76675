use chrono::NaiveDate;
use veteri_core::db::open_db_in_memory;
use veteri_core::{
    Pet, PetRepository, PetStatus, RepoError, SqlitePetRepository, ValidationError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn toby() -> Pet {
    Pet::new("Toby", "Dog", "Beagle", Some(date(2015, 4, 2)), 12.5, None)
}

#[test]
fn insert_assigns_id_and_get_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    let mut pet = toby();
    assert_eq!(repo.insert_pet(&mut pet).unwrap(), 1);
    let id = pet.id.expect("id written back");

    let loaded = repo.get_pet(id).unwrap().unwrap();
    assert_eq!(loaded, pet);
    assert_eq!(loaded.status, PetStatus::Active);
    assert_eq!(loaded.death_date, None);
    assert_eq!(loaded.memorial_notes, None);
}

#[test]
fn list_and_delete_track_row_count() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    let mut first = toby();
    let mut second = Pet::new("Misu", "Cat", "Siamese", None, 4.0, None);
    repo.insert_pet(&mut first).unwrap();
    repo.insert_pet(&mut second).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(repo.list_pets().unwrap().len(), 2);

    assert_eq!(repo.delete_pet(first.id.unwrap()).unwrap(), 1);
    assert_eq!(repo.list_pets().unwrap().len(), 1);
    assert_eq!(repo.get_pet(first.id.unwrap()).unwrap(), None);
    assert_eq!(repo.delete_pet(first.id.unwrap()).unwrap(), 0);
}

#[test]
fn update_marks_pet_deceased_and_back_to_active() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();
    let mut pet = toby();
    repo.insert_pet(&mut pet).unwrap();
    let id = pet.id.unwrap();

    pet.mark_deceased(Some(date(2024, 11, 3)));
    pet.set_memorial_notes("Buen perro");
    assert_eq!(repo.update_pet(&pet).unwrap(), 1);

    let loaded = repo.get_pet(id).unwrap().unwrap();
    assert_eq!(loaded.status, PetStatus::Deceased);
    assert_eq!(loaded.death_date, Some(date(2024, 11, 3)));
    assert_eq!(loaded.memorial_notes.as_deref(), Some("Buen perro"));

    pet.mark_active();
    repo.update_pet(&pet).unwrap();
    let loaded = repo.get_pet(id).unwrap().unwrap();
    assert_eq!(loaded.status, PetStatus::Active);
    assert_eq!(loaded.death_date, None);
}

#[test]
fn update_missing_pet_affects_zero_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    let mut pet = toby();
    pet.id = Some(4242);
    assert_eq!(repo.update_pet(&pet).unwrap(), 0);
}

#[test]
fn update_without_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.update_pet(&toby()),
        Err(RepoError::Validation(ValidationError::MissingId("pet")))
    ));
}

#[test]
fn inconsistent_status_is_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    let mut pet = toby();
    pet.status = PetStatus::Deceased;
    assert!(matches!(
        repo.insert_pet(&mut pet),
        Err(RepoError::Validation(
            ValidationError::DeceasedWithoutDeathDate
        ))
    ));
    assert_eq!(pet.id, None);

    let mut negative = toby();
    negative.weight = -1.0;
    assert!(matches!(
        repo.insert_pet(&mut negative),
        Err(RepoError::Validation(ValidationError::InvalidWeight(_)))
    ));
    assert!(repo.list_pets().unwrap().is_empty());
}

#[test]
fn unknown_owner_key_is_a_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    let mut pet = toby();
    pet.owner_id = Some("NOPE".to_string());
    let err = repo.insert_pet(&mut pet).unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
}

#[test]
fn blank_owner_key_is_stored_as_no_owner() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    let mut pet = toby();
    pet.owner_id = Some("  ".to_string());
    repo.insert_pet(&mut pet).unwrap();

    let loaded = repo.get_pet(pet.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.owner_id, None);
}

#[test]
fn status_text_is_read_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO pets (name, weight, status, death_date)
         VALUES ('Rex', 20.0, 'DECEASED', '2023-01-05');",
        [],
    )
    .unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    let pets = repo.list_pets().unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].status, PetStatus::Deceased);
    assert_eq!(pets[0].death_date, Some(date(2023, 1, 5)));
}

#[test]
fn unrecognized_status_text_fails_the_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO pets (name, weight, status) VALUES ('Rex', 20.0, 'missing');",
        [],
    )
    .unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    match repo.list_pets() {
        Err(RepoError::UnrecognizedStatus(err)) => assert_eq!(err.value, "missing"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn undecodable_birth_date_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO pets (name, weight, birth_date) VALUES ('Rex', 20.0, 'soon');",
        [],
    )
    .unwrap();
    let repo = SqlitePetRepository::try_new(&conn).unwrap();

    match repo.list_pets() {
        Err(RepoError::InvalidData(message)) => assert!(message.contains("pets.birth_date")),
        other => panic!("unexpected result: {other:?}"),
    }
}
