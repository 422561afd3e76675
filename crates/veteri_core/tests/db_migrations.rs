use rusqlite::Connection;
use veteri_core::db::migrations::{apply_migrations, latest_version, schema_state};
use veteri_core::db::{open_db, open_db_in_memory, DbError, SchemaState};
use veteri_core::{RepoError, SqlitePetRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in [
        "owners",
        "veterinarians",
        "pets",
        "appointments",
        "treatments",
        "veterinarian_appointments",
    ] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("veteri.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO owners (national_id, name) VALUES ('12345678A', 'Ana');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let owners: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM owners;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(owners, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqlitePetRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        }) => {
            assert_eq!(expected_version, latest_version());
            assert_eq!(actual_version, 0);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected unmigrated connection to be rejected"),
    }
}

#[test]
fn schema_state_tracks_migration_progress() {
    let mut conn = Connection::open_in_memory().unwrap();
    assert_eq!(
        schema_state(&conn).unwrap(),
        SchemaState::Behind {
            actual: 0,
            latest: latest_version()
        }
    );

    apply_migrations(&mut conn).unwrap();
    assert_eq!(
        schema_state(&conn).unwrap(),
        SchemaState::Current(latest_version())
    );

    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    assert_eq!(
        schema_state(&conn).unwrap(),
        SchemaState::Ahead {
            actual: 999,
            latest: latest_version()
        }
    );
}

#[test]
fn failed_migration_step_is_named_and_rolled_back() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE veterinarian_appointments (legacy TEXT);
         PRAGMA user_version = 1;",
    )
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert_eq!(err.failed_migration(), Some(2));
    assert!(matches!(
        err,
        DbError::Migration {
            version: 2,
            name: "veterinarian_appointments",
            ..
        }
    ));
    assert!(err.to_string().starts_with("migration 0002"));
    assert_eq!(schema_version(&conn), 1);
}

#[test]
fn repository_rejects_connection_from_newer_build() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();

    assert!(matches!(
        SqlitePetRepository::try_new(&conn),
        Err(RepoError::UninitializedConnection {
            actual_version: 999,
            ..
        })
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
