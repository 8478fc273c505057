//! Client store contract and SQLite document implementation.

use super::{decode_document, encode_document, RepoError, RepoResult};
use crate::db::ensure_schema;
use crate::model::client::Client;
use rusqlite::{params, Connection, Row};

const COLLECTION: &str = "clients";

/// Read/write access to stored clients.
pub trait ClientStore {
    fn find_client_by_id(&self, client_id: &str) -> RepoResult<Option<Client>>;
    /// Lists clients ordered by `client_id`.
    fn list_clients(&self) -> RepoResult<Vec<Client>>;
    /// Inserts or replaces a client by `client_id`.
    fn save_client(&self, client: &Client) -> RepoResult<()>;
    fn delete_client(&self, client_id: &str) -> RepoResult<()>;
}

/// SQLite-backed client store.
pub struct SqliteClientStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientStore<'conn> {
    /// Creates a store after checking the schema is current.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn)?;
        Ok(Self { conn })
    }
}

impl ClientStore for SqliteClientStore<'_> {
    fn find_client_by_id(&self, client_id: &str) -> RepoResult<Option<Client>> {
        let mut stmt = self
            .conn
            .prepare("SELECT client_id, document FROM clients WHERE client_id = ?1;")?;
        let mut rows = stmt.query([client_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }
        Ok(None)
    }

    fn list_clients(&self) -> RepoResult<Vec<Client>> {
        let mut stmt = self
            .conn
            .prepare("SELECT client_id, document FROM clients ORDER BY client_id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next()? {
            clients.push(parse_client_row(row)?);
        }
        Ok(clients)
    }

    fn save_client(&self, client: &Client) -> RepoResult<()> {
        client.validate()?;
        let document = encode_document(COLLECTION, client)?;

        self.conn.execute(
            "INSERT INTO clients (client_id, document)
             VALUES (?1, ?2)
             ON CONFLICT(client_id) DO UPDATE SET
                document = excluded.document,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![client.client_id.as_str(), document],
        )?;
        Ok(())
    }

    fn delete_client(&self, client_id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM clients WHERE client_id = ?1;", [client_id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                collection: "client",
                key: client_id.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    let key: String = row.get("client_id")?;
    let document: String = row.get("document")?;
    let client: Client = decode_document(COLLECTION, &key, &document)?;

    if client.client_id != key {
        return Err(RepoError::InvalidData(format!(
            "clients.client_id `{key}` does not match document client_id `{}`",
            client.client_id
        )));
    }
    client.validate()?;
    Ok(client)
}
