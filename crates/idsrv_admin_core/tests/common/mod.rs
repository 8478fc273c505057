#![allow(dead_code)]

use idsrv_admin_core::db::open_db;
use idsrv_admin_core::{
    run_script, AdminService, Output, Script, SqliteClientStore, SqliteScopeStore,
};
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated on-disk database with the schema installed.
pub struct AdminFixture {
    pub conn: Connection,
    pub dir: TempDir,
}

impl AdminFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = open_db(dir.path().join("admin.db")).unwrap();
        AdminService::new(&mut conn).create_database().unwrap();
        Self { conn, dir }
    }

    pub fn service(&mut self) -> AdminService<'_> {
        AdminService::new(&mut self.conn)
    }

    pub fn scope_store(&self) -> SqliteScopeStore<'_> {
        SqliteScopeStore::try_new(&self.conn).unwrap()
    }

    pub fn client_store(&self) -> SqliteClientStore<'_> {
        SqliteClientStore::try_new(&self.conn).unwrap()
    }

    /// Runs `tests/scripts/<name>.json` against this database.
    pub fn run_script(&mut self, name: &str) -> Vec<Output> {
        let script = load_script(name);
        run_script(&mut self.service(), &script).unwrap()
    }
}

pub fn load_script(name: &str) -> Script {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("scripts")
        .join(format!("{name}.json"));
    Script::from_path(path).unwrap()
}
