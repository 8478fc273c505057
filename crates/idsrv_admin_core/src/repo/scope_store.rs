//! Scope store contract and SQLite document implementation.
//!
//! # Invariants
//! - `scopes.name` always equals the `name` inside the stored document.
//! - `scopes.show_in_discovery_document` mirrors the document flag.

use super::{bool_to_int, decode_document, encode_document, RepoError, RepoResult};
use crate::db::ensure_schema;
use crate::model::scope::Scope;
use rusqlite::{params, params_from_iter, Connection, Row};

const COLLECTION: &str = "scopes";

/// Read/write access to stored scopes.
pub trait ScopeStore {
    /// Lists scopes ordered by name.
    ///
    /// With `public_only`, only scopes shown in the discovery document are
    /// returned.
    fn list_scopes(&self, public_only: bool) -> RepoResult<Vec<Scope>>;
    /// Returns the scopes whose names are listed; unknown names are skipped.
    fn find_scopes_by_names(&self, names: &[String]) -> RepoResult<Vec<Scope>>;
    /// Inserts or replaces a scope by name.
    fn save_scope(&self, scope: &Scope) -> RepoResult<()>;
    fn delete_scope(&self, name: &str) -> RepoResult<()>;
}

/// SQLite-backed scope store.
pub struct SqliteScopeStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteScopeStore<'conn> {
    /// Creates a store after checking the schema is current.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn)?;
        Ok(Self { conn })
    }
}

impl ScopeStore for SqliteScopeStore<'_> {
    fn list_scopes(&self, public_only: bool) -> RepoResult<Vec<Scope>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, document
             FROM scopes
             WHERE (?1 = 0 OR show_in_discovery_document = 1)
             ORDER BY name ASC;",
        )?;
        let mut rows = stmt.query([bool_to_int(public_only)])?;
        let mut scopes = Vec::new();
        while let Some(row) = rows.next()? {
            scopes.push(parse_scope_row(row)?);
        }
        Ok(scopes)
    }

    fn find_scopes_by_names(&self, names: &[String]) -> RepoResult<Vec<Scope>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; names.len()].join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT name, document FROM scopes WHERE name IN ({placeholders}) ORDER BY name ASC;"
        ))?;
        let mut rows = stmt.query(params_from_iter(names.iter()))?;
        let mut scopes = Vec::new();
        while let Some(row) = rows.next()? {
            scopes.push(parse_scope_row(row)?);
        }
        Ok(scopes)
    }

    fn save_scope(&self, scope: &Scope) -> RepoResult<()> {
        scope.validate()?;
        let document = encode_document(COLLECTION, scope)?;

        self.conn.execute(
            "INSERT INTO scopes (name, document, show_in_discovery_document)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET
                document = excluded.document,
                show_in_discovery_document = excluded.show_in_discovery_document,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                scope.name.as_str(),
                document,
                bool_to_int(scope.show_in_discovery_document),
            ],
        )?;
        Ok(())
    }

    fn delete_scope(&self, name: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM scopes WHERE name = ?1;", [name])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                collection: "scope",
                key: name.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_scope_row(row: &Row<'_>) -> RepoResult<Scope> {
    let key: String = row.get("name")?;
    let document: String = row.get("document")?;
    let scope: Scope = decode_document(COLLECTION, &key, &document)?;

    if scope.name != key {
        return Err(RepoError::InvalidData(format!(
            "scopes.name `{key}` does not match document name `{}`",
            scope.name
        )));
    }
    scope.validate()?;
    Ok(scope)
}
