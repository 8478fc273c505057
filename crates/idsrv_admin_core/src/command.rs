//! Admin command table and executor.
//!
//! # Responsibility
//! - Map external command names to their parameter schema and behaviour.
//! - Run one command against an `AdminService` and emit its output.
//!
//! # Invariants
//! - Parameters are fully bound before any entity is built or persisted.
//! - Store failures propagate unchanged; nothing is retried.
//! - Persisting commands accept either a piped entity or their builder
//!   parameters, never both.

use crate::model::client::Client;
use crate::model::scope::{Scope, ScopeClaim};
use crate::model::secret::{ClientClaim, Secret};
use crate::params::schema::{
    GET_SCOPES, NEW_CLIENT, NEW_CLIENT_CLAIM, NEW_CLIENT_SECRET, NEW_SCOPE, NEW_SCOPE_CLAIM,
    NO_PARAMS, REMOVE_CLIENT, REMOVE_SCOPE,
};
use crate::params::{bind, BindError, ParamSet, Schema};
use crate::repo::RepoError;
use crate::service::admin_service::AdminService;
use crate::service::mapper;
use log::{error, info};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Instant;

/// Every command exposed by the admin toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    NewClient,
    NewScope,
    NewScopeClaim,
    NewClientSecret,
    NewClientClaim,
    AddClient,
    AddScope,
    GetClients,
    GetScopes,
    RemoveClient,
    RemoveScope,
    InstallDatabase,
    RemoveDatabase,
}

impl CommandKind {
    pub const ALL: &'static [CommandKind] = &[
        CommandKind::NewClient,
        CommandKind::NewScope,
        CommandKind::NewScopeClaim,
        CommandKind::NewClientSecret,
        CommandKind::NewClientClaim,
        CommandKind::AddClient,
        CommandKind::AddScope,
        CommandKind::GetClients,
        CommandKind::GetScopes,
        CommandKind::RemoveClient,
        CommandKind::RemoveScope,
        CommandKind::InstallDatabase,
        CommandKind::RemoveDatabase,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::NewClient => "new-client",
            Self::NewScope => "new-scope",
            Self::NewScopeClaim => "new-scope-claim",
            Self::NewClientSecret => "new-client-secret",
            Self::NewClientClaim => "new-client-claim",
            Self::AddClient => "add-client",
            Self::AddScope => "add-scope",
            Self::GetClients => "get-clients",
            Self::GetScopes => "get-scopes",
            Self::RemoveClient => "remove-client",
            Self::RemoveScope => "remove-scope",
            Self::InstallDatabase => "install-database",
            Self::RemoveDatabase => "remove-database",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::NewClient => "Build a client document from parameters",
            Self::NewScope => "Build a scope document from parameters",
            Self::NewScopeClaim => "Build a scope claim",
            Self::NewClientSecret => "Build a client or scope secret",
            Self::NewClientClaim => "Build a static client claim",
            Self::AddClient => "Persist a piped client, or one built from new-client parameters",
            Self::AddScope => "Persist a piped scope, or one built from new-scope parameters",
            Self::GetClients => "List stored clients",
            Self::GetScopes => "List stored scopes",
            Self::RemoveClient => "Delete a stored client by id",
            Self::RemoveScope => "Delete a stored scope by name",
            Self::InstallDatabase => "Create the document collections (idempotent)",
            Self::RemoveDatabase => "Drop the document collections",
        }
    }

    /// Parameter table consulted by the binder.
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::NewClient | Self::AddClient => &NEW_CLIENT,
            Self::NewScope | Self::AddScope => &NEW_SCOPE,
            Self::NewScopeClaim => &NEW_SCOPE_CLAIM,
            Self::NewClientSecret => &NEW_CLIENT_SECRET,
            Self::NewClientClaim => &NEW_CLIENT_CLAIM,
            Self::GetScopes => &GET_SCOPES,
            Self::RemoveClient => &REMOVE_CLIENT,
            Self::RemoveScope => &REMOVE_SCOPE,
            Self::GetClients | Self::InstallDatabase | Self::RemoveDatabase => &NO_PARAMS,
        }
    }

    /// Decodes a serialized pipeline input document for this command.
    pub fn decode_input(self, value: Value) -> Result<Output, CommandError> {
        let decoded = match self {
            Self::AddClient => serde_json::from_value::<Client>(value).map(Output::Client),
            Self::AddScope => serde_json::from_value::<Scope>(value).map(Output::Scope),
            _ => {
                return Err(CommandError::UnexpectedInput {
                    command: self.name(),
                    found: "document",
                })
            }
        };
        decoded.map_err(|err| CommandError::InvalidInput {
            command: self.name(),
            message: err.to_string(),
        })
    }
}

impl FromStr for CommandKind {
    type Err = CommandError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CommandError::UnknownCommand(trimmed.to_string()))
    }
}

impl Display for CommandKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Object emitted by a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Client(Client),
    Scope(Scope),
    ScopeClaim(ScopeClaim),
    Secret(Secret),
    ClientClaim(ClientClaim),
    Clients(Vec<Client>),
    Scopes(Vec<Scope>),
    /// Commands with no result (e.g. removals).
    None,
}

impl Output {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Client(_) => "client",
            Self::Scope(_) => "scope",
            Self::ScopeClaim(_) => "scope claim",
            Self::Secret(_) => "secret",
            Self::ClientClaim(_) => "client claim",
            Self::Clients(_) => "client list",
            Self::Scopes(_) => "scope list",
            Self::None => "nothing",
        }
    }
}

/// Command lookup, binding and execution errors.
#[derive(Debug)]
pub enum CommandError {
    UnknownCommand(String),
    Bind(BindError),
    Repo(RepoError),
    /// Pipeline input the command cannot consume.
    UnexpectedInput {
        command: &'static str,
        found: &'static str,
    },
    /// Piped input and builder parameters were both supplied.
    InputWithParams { command: &'static str },
    InvalidInput {
        command: &'static str,
        message: String,
    },
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(name) => write!(f, "unknown command `{name}`"),
            Self::Bind(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::UnexpectedInput { command, found } => {
                write!(f, "{command} cannot accept piped {found}")
            }
            Self::InputWithParams { command } => write!(
                f,
                "{command} takes either a piped object or builder parameters, not both"
            ),
            Self::InvalidInput { command, message } => {
                write!(f, "{command}: invalid input document: {message}")
            }
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bind(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BindError> for CommandError {
    fn from(value: BindError) -> Self {
        Self::Bind(value)
    }
}

impl From<RepoError> for CommandError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Runs one command.
///
/// `input` is the previous pipeline step's output, if any. `Output::None`
/// counts as no input.
///
/// # Side effects
/// - Emits `command_run` logging events with duration and status.
pub fn execute(
    service: &mut AdminService<'_>,
    kind: CommandKind,
    params: &ParamSet,
    input: Option<Output>,
) -> Result<Output, CommandError> {
    let input = input.filter(|output| !matches!(output, Output::None));
    let started_at = Instant::now();
    info!(
        "event=command_run module=command status=start command={} params={} piped={}",
        kind,
        params.len(),
        input.as_ref().map_or("none", Output::kind)
    );

    match run(service, kind, params, input) {
        Ok(output) => {
            info!(
                "event=command_run module=command status=ok command={} duration_ms={} output={}",
                kind,
                started_at.elapsed().as_millis(),
                output.kind()
            );
            Ok(output)
        }
        Err(err) => {
            error!(
                "event=command_run module=command status=error command={} duration_ms={} error={}",
                kind,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn run(
    service: &mut AdminService<'_>,
    kind: CommandKind,
    params: &ParamSet,
    input: Option<Output>,
) -> Result<Output, CommandError> {
    let output = match kind {
        CommandKind::AddClient => {
            let client = match input {
                Some(Output::Client(_)) if !params.is_empty() => {
                    return Err(CommandError::InputWithParams {
                        command: kind.name(),
                    });
                }
                Some(Output::Client(client)) => client,
                Some(other) => return Err(unexpected(kind, &other)),
                None => mapper::new_client(params)?,
            };
            service.save_client(&client)?;
            Output::Client(client)
        }
        CommandKind::AddScope => {
            let scope = match input {
                Some(Output::Scope(_)) if !params.is_empty() => {
                    return Err(CommandError::InputWithParams {
                        command: kind.name(),
                    });
                }
                Some(Output::Scope(scope)) => scope,
                Some(other) => return Err(unexpected(kind, &other)),
                None => mapper::new_scope(params)?,
            };
            service.save_scope(&scope)?;
            Output::Scope(scope)
        }
        CommandKind::NewClient => {
            reject_input(kind, input)?;
            Output::Client(mapper::new_client(params)?)
        }
        CommandKind::NewScope => {
            reject_input(kind, input)?;
            Output::Scope(mapper::new_scope(params)?)
        }
        CommandKind::NewScopeClaim => {
            reject_input(kind, input)?;
            Output::ScopeClaim(mapper::new_scope_claim(params)?)
        }
        CommandKind::NewClientSecret => {
            reject_input(kind, input)?;
            Output::Secret(mapper::new_client_secret(params)?)
        }
        CommandKind::NewClientClaim => {
            reject_input(kind, input)?;
            Output::ClientClaim(mapper::new_client_claim(params)?)
        }
        CommandKind::GetClients => {
            reject_input(kind, input)?;
            bind(kind.schema(), params)?;
            Output::Clients(service.list_clients()?)
        }
        CommandKind::GetScopes => {
            reject_input(kind, input)?;
            let bound = bind(kind.schema(), params)?;
            let public_only = bound.flag("PublicOnly").unwrap_or(false);
            Output::Scopes(service.list_scopes(public_only)?)
        }
        CommandKind::RemoveClient => {
            reject_input(kind, input)?;
            let bound = bind(kind.schema(), params)?;
            service.delete_client(&bound.required_text(kind.name(), "ClientId")?)?;
            Output::None
        }
        CommandKind::RemoveScope => {
            reject_input(kind, input)?;
            let bound = bind(kind.schema(), params)?;
            service.delete_scope(&bound.required_text(kind.name(), "Name")?)?;
            Output::None
        }
        CommandKind::InstallDatabase => {
            reject_input(kind, input)?;
            bind(kind.schema(), params)?;
            service.create_database()?;
            Output::None
        }
        CommandKind::RemoveDatabase => {
            reject_input(kind, input)?;
            bind(kind.schema(), params)?;
            service.remove_database()?;
            Output::None
        }
    };
    Ok(output)
}

fn reject_input(kind: CommandKind, input: Option<Output>) -> Result<(), CommandError> {
    match input {
        Some(other) => Err(unexpected(kind, &other)),
        None => Ok(()),
    }
}

fn unexpected(kind: CommandKind, input: &Output) -> CommandError {
    CommandError::UnexpectedInput {
        command: kind.name(),
        found: input.kind(),
    }
}
