//! Store abstractions and SQLite document implementations.
//!
//! # Responsibility
//! - Define the persistence contracts consumed by admin commands.
//! - Keep SQL and JSON document details inside the storage boundary.
//!
//! # Invariants
//! - Write paths validate the entity before any SQL mutation.
//! - Read paths reject invalid persisted documents instead of masking them.
//! - Stores refuse to operate before the schema is created.

use crate::db::DbError;
use crate::model::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client_store;
pub mod scope_store;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        collection: &'static str,
        key: String,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, key } => write!(f, "{collection} not found: {key}"),
            Self::InvalidData(message) => write!(f, "invalid persisted document: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn encode_document<T: Serialize>(collection: &str, value: &T) -> RepoResult<String> {
    serde_json::to_string(value)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode {collection} document: {err}")))
}

fn decode_document<T: DeserializeOwned>(collection: &str, key: &str, text: &str) -> RepoResult<T> {
    serde_json::from_str(text).map_err(|err| {
        RepoError::InvalidData(format!("{collection}.document for `{key}`: {err}"))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
