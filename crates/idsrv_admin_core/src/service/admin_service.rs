//! Administration use-case service.
//!
//! # Responsibility
//! - Own database lifecycle (create/remove) for one connection.
//! - Provide persistence entry points over the client and scope stores.
//!
//! # Invariants
//! - `create_database` is idempotent.
//! - Store failures propagate unchanged; nothing is retried.

use crate::db::{apply_migrations, drop_schema};
use crate::model::client::Client;
use crate::model::scope::Scope;
use crate::repo::client_store::{ClientStore, SqliteClientStore};
use crate::repo::scope_store::{ScopeStore, SqliteScopeStore};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;

/// Use-case service bound to one SQLite connection.
pub struct AdminService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> AdminService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Creates (or upgrades) the document collections.
    pub fn create_database(&mut self) -> RepoResult<()> {
        let applied = apply_migrations(self.conn)?;
        info!(
            "event=create_database module=service status=ok migrations_applied={}",
            applied
        );
        Ok(())
    }

    /// Drops every collection; a later `create_database` starts empty.
    pub fn remove_database(&mut self) -> RepoResult<()> {
        drop_schema(self.conn)?;
        info!("event=remove_database module=service status=ok");
        Ok(())
    }

    pub fn clients(&self) -> RepoResult<SqliteClientStore<'_>> {
        SqliteClientStore::try_new(&*self.conn)
    }

    pub fn scopes(&self) -> RepoResult<SqliteScopeStore<'_>> {
        SqliteScopeStore::try_new(&*self.conn)
    }

    pub fn save_client(&self, client: &Client) -> RepoResult<()> {
        self.clients()?.save_client(client)?;
        info!(
            "event=client_save module=service status=ok client_id={}",
            client.client_id
        );
        Ok(())
    }

    pub fn save_scope(&self, scope: &Scope) -> RepoResult<()> {
        self.scopes()?.save_scope(scope)?;
        info!(
            "event=scope_save module=service status=ok name={} claims={}",
            scope.name,
            scope.claims.len()
        );
        Ok(())
    }

    pub fn delete_client(&self, client_id: &str) -> RepoResult<()> {
        self.clients()?.delete_client(client_id)?;
        info!("event=client_delete module=service status=ok client_id={client_id}");
        Ok(())
    }

    pub fn delete_scope(&self, name: &str) -> RepoResult<()> {
        self.scopes()?.delete_scope(name)?;
        info!("event=scope_delete module=service status=ok name={name}");
        Ok(())
    }

    pub fn list_clients(&self) -> RepoResult<Vec<Client>> {
        self.clients()?.list_clients()
    }

    pub fn list_scopes(&self, public_only: bool) -> RepoResult<Vec<Scope>> {
        self.scopes()?.list_scopes(public_only)
    }
}
