//! Parameter-to-entity mapping entry points.
//!
//! # Responsibility
//! - Bind raw parameters against the command schema.
//! - Build the entity from its constructor defaults and merge the patch.
//!
//! # Invariants
//! - Binding completes before construction starts; a failed bind never
//!   yields a partially populated entity.
//! - Fields whose parameter was omitted keep the constructor default.

use crate::model::client::Client;
use crate::model::scope::{Scope, ScopeClaim};
use crate::model::secret::{ClientClaim, Secret};
use crate::params::schema::{
    NEW_CLIENT, NEW_CLIENT_CLAIM, NEW_CLIENT_SECRET, NEW_SCOPE, NEW_SCOPE_CLAIM,
};
use crate::params::{bind, BindError, ParamSet};
use crate::patch::{
    client_claim_from_bound, scope_claim_from_bound, secret_from_bound, ClientPatch, ScopePatch,
};

/// Builds a client from `new-client` parameters.
///
/// `ClientId` and `ClientName` are mandatory; every other field keeps the
/// `Client::new` default unless supplied. Collection parameters are appended.
pub fn new_client(params: &ParamSet) -> Result<Client, BindError> {
    let bound = bind(&NEW_CLIENT, params)?;
    let client_id = bound.required_text(NEW_CLIENT.command, "ClientId")?;
    let client_name = bound.required_text(NEW_CLIENT.command, "ClientName")?;
    let patch = ClientPatch::from_bound(&bound)?;
    Ok(patch.apply(Client::new(client_id, client_name)))
}

/// Builds a scope from `new-scope` parameters.
pub fn new_scope(params: &ParamSet) -> Result<Scope, BindError> {
    let bound = bind(&NEW_SCOPE, params)?;
    let name = bound.required_text(NEW_SCOPE.command, "Name")?;
    let patch = ScopePatch::from_bound(&bound)?;
    Ok(patch.apply(Scope::new(name)))
}

pub fn new_scope_claim(params: &ParamSet) -> Result<ScopeClaim, BindError> {
    scope_claim_from_bound(&bind(&NEW_SCOPE_CLAIM, params)?)
}

pub fn new_client_secret(params: &ParamSet) -> Result<Secret, BindError> {
    secret_from_bound(&bind(&NEW_CLIENT_SECRET, params)?)
}

pub fn new_client_claim(params: &ParamSet) -> Result<ClientClaim, BindError> {
    client_claim_from_bound(&bind(&NEW_CLIENT_CLAIM, params)?)
}
