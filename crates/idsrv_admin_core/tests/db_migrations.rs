use idsrv_admin_core::db::migrations::latest_version;
use idsrv_admin_core::db::{open_db, open_db_in_memory, DbError};
use idsrv_admin_core::{AdminService, RepoError, SqliteClientStore, SqliteScopeStore};
use rusqlite::Connection;

#[test]
fn opening_does_not_create_collections() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), 0);
    assert!(!table_exists(&conn, "clients"));
    assert!(!table_exists(&conn, "scopes"));
}

#[test]
fn create_database_applies_all_migrations() {
    let mut conn = open_db_in_memory().unwrap();
    AdminService::new(&mut conn).create_database().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(table_exists(&conn, "clients"));
    assert!(table_exists(&conn, "scopes"));
}

#[test]
fn create_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admin.db");

    let mut first = open_db(&path).unwrap();
    AdminService::new(&mut first).create_database().unwrap();
    drop(first);

    let mut second = open_db(&path).unwrap();
    AdminService::new(&mut second).create_database().unwrap();
    assert_eq!(schema_version(&second), latest_version());
}

#[test]
fn stores_refuse_uninitialized_database() {
    let conn = open_db_in_memory().unwrap();

    let err = SqliteScopeStore::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::Db(DbError::SchemaNotInitialized { db_version: 0, .. })
    ));
    assert!(SqliteClientStore::try_new(&conn).is_err());
}

#[test]
fn newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let mut conn = open_db(&path).unwrap();
    let err = AdminService::new(&mut conn).create_database().unwrap_err();
    match err {
        RepoError::Db(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn remove_database_drops_collections() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AdminService::new(&mut conn);
    service.create_database().unwrap();
    service.remove_database().unwrap();
    drop(service);

    assert_eq!(schema_version(&conn), 0);
    assert!(!table_exists(&conn, "clients"));
    assert!(!table_exists(&conn, "scopes"));
}

#[test]
fn discovery_column_is_backfilled_from_documents() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(include_str!("../src/db/migrations/0001_init.sql"))
        .unwrap();
    conn.execute_batch(
        "PRAGMA user_version = 1;
         INSERT INTO scopes (name, document) VALUES
            ('hidden', '{\"name\":\"hidden\",\"show_in_discovery_document\":false}'),
            ('shown', '{\"name\":\"shown\",\"show_in_discovery_document\":true}');",
    )
    .unwrap();

    AdminService::new(&mut conn).create_database().unwrap();

    let visible: Vec<String> = conn
        .prepare("SELECT name FROM scopes WHERE show_in_discovery_document = 1;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(visible, vec!["shown".to_string()]);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
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
    exists == 1
}
