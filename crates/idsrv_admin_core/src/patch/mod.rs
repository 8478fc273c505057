//! Default-preserving patches over domain entities.
//!
//! # Responsibility
//! - Hold the optional, caller-supplied values of one command invocation.
//! - Merge them onto a constructor-default entity.
//!
//! # Invariants
//! - `None` fields never touch the base entity.
//! - Collection fields extend the base collection; they never replace it.

use crate::model::scope::ScopeClaim;
use crate::model::secret::{ClientClaim, Secret};
use crate::params::{BindError, BoundParams};
use std::fmt::Display;
use std::str::FromStr;

pub mod client_patch;
pub mod scope_patch;

pub use client_patch::ClientPatch;
pub use scope_patch::ScopePatch;

pub(crate) fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

pub(crate) fn merge_some<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

pub(crate) fn append<T>(target: &mut Vec<T>, values: Option<Vec<T>>) {
    if let Some(values) = values {
        target.extend(values);
    }
}

pub(crate) fn owned_text(bound: &BoundParams, name: &str) -> Option<String> {
    bound.text(name).map(str::to_string)
}

pub(crate) fn owned_list(bound: &BoundParams, name: &str) -> Option<Vec<String>> {
    bound.list(name).map(<[String]>::to_vec)
}

/// Parses a bound choice into its enum; the binder already matched the name.
pub(crate) fn parse_choice<T>(bound: &BoundParams, name: &'static str) -> Result<Option<T>, BindError>
where
    T: FromStr,
    T::Err: Display,
{
    bound
        .choice(name)
        .map(|value| {
            value.parse::<T>().map_err(|err| BindError::InvalidType {
                name,
                expected: "known variant".to_string(),
                found: err.to_string(),
            })
        })
        .transpose()
}

pub(crate) fn map_objects<T>(
    bound: &BoundParams,
    name: &str,
    convert: impl Fn(&BoundParams) -> Result<T, BindError>,
) -> Result<Option<Vec<T>>, BindError> {
    bound
        .objects(name)
        .map(|items| items.iter().map(&convert).collect::<Result<Vec<_>, _>>())
        .transpose()
}

/// Builds a `Secret` from a bound `new-client-secret` parameter set.
pub fn secret_from_bound(bound: &BoundParams) -> Result<Secret, BindError> {
    let mut secret = Secret::new(bound.required_text("new-client-secret", "Value")?);
    merge_some(&mut secret.description, owned_text(bound, "Description"));
    merge_some(&mut secret.expiration, bound.int("Expiration"));
    merge(&mut secret.secret_type, owned_text(bound, "Type"));
    Ok(secret)
}

/// Builds a `ClientClaim` from a bound `new-client-claim` parameter set.
pub fn client_claim_from_bound(bound: &BoundParams) -> Result<ClientClaim, BindError> {
    Ok(ClientClaim::new(
        bound.required_text("new-client-claim", "Type")?,
        bound.required_text("new-client-claim", "Value")?,
    ))
}

/// Builds a `ScopeClaim` from a bound `new-scope-claim` parameter set.
pub fn scope_claim_from_bound(bound: &BoundParams) -> Result<ScopeClaim, BindError> {
    let mut claim = ScopeClaim::new(bound.required_text("new-scope-claim", "Name")?);
    merge_some(&mut claim.description, owned_text(bound, "Description"));
    merge(
        &mut claim.always_include_in_id_token,
        bound.flag("AlwaysIncludeInIdToken"),
    );
    Ok(claim)
}
