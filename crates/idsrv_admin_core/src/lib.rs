//! Core administration logic for an OAuth2/OpenID Connect identity server.
//! Builds client and scope documents from command parameters and persists
//! them in a SQLite-backed document store.

pub mod command;
pub mod db;
pub mod logging;
pub mod model;
pub mod params;
pub mod patch;
pub mod repo;
pub mod script;
pub mod service;

pub use command::{execute, CommandError, CommandKind, Output};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget, LoggingError,
};
pub use model::client::{AccessTokenType, Client, Flow, TokenExpiration, TokenUsage};
pub use model::scope::{Scope, ScopeClaim, ScopeType};
pub use model::secret::{ClientClaim, Secret};
pub use model::ValidationError;
pub use params::{BindError, ParamSet};
pub use patch::{ClientPatch, ScopePatch};
pub use repo::client_store::{ClientStore, SqliteClientStore};
pub use repo::scope_store::{ScopeStore, SqliteScopeStore};
pub use repo::{RepoError, RepoResult};
pub use script::{run_script, Script, ScriptError};
pub use service::admin_service::AdminService;
pub use service::mapper::{
    new_client, new_client_claim, new_client_secret, new_scope, new_scope_claim,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
