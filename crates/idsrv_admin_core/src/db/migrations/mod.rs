//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Drop all collections on request.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_scope_discovery.sql"),
    },
];

const DROP_SQL: &str = "DROP INDEX IF EXISTS idx_scopes_discovery;
DROP TABLE IF EXISTS scopes;
DROP TABLE IF EXISTS clients;
PRAGMA user_version = 0;";

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
///
/// Returns the number of migrations applied; `0` means the schema was
/// already current.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let started_at = Instant::now();
    let from_version = checked_version(conn)?;
    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for migration in &pending {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} applied={} duration_ms={}",
        from_version,
        latest_version(),
        pending.len(),
        started_at.elapsed().as_millis()
    );
    Ok(pending.len())
}

/// Fails unless the schema is exactly at the latest version.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    let db_version = checked_version(conn)?;
    if db_version < latest_version() {
        return Err(DbError::SchemaNotInitialized {
            db_version,
            latest_supported: latest_version(),
        });
    }
    Ok(())
}

/// Drops every admin collection and resets the schema version.
pub fn drop_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(DROP_SQL)?;
    tx.commit()?;
    info!("event=db_drop module=db status=ok");
    Ok(())
}

/// Reads `user_version`, rejecting databases written by a newer binary.
fn checked_version(conn: &Connection) -> DbResult<u32> {
    let db_version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if db_version > latest_version() {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: latest_version(),
        });
    }
    Ok(db_version)
}
