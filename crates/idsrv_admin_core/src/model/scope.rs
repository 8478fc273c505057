//! Scope domain model.
//!
//! # Responsibility
//! - Define the persisted shape of an identity or resource scope.
//! - Own the claim list a scope contributes to issued tokens.
//!
//! # Invariants
//! - `name` is the natural key and never blank.
//! - Claim order is preserved as supplied.

use super::secret::Secret;
use super::{require_text, validate_each, ValidationError};
use serde::{Deserialize, Serialize};

/// Whether a scope describes identity data or an API resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeType {
    Identity,
    Resource,
}

named_variants!(ScopeType, "scope type", [Identity, Resource]);

/// Single identity attribute contributed by a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeClaim {
    pub name: String,
    pub description: Option<String>,
    pub always_include_in_id_token: bool,
}

impl ScopeClaim {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            always_include_in_id_token: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "name")
    }
}

/// Named permission/claim-set a client can request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    /// Identifier of a custom claims-transformation rule.
    pub claims_rule: Option<String>,
    pub scope_type: ScopeType,
    pub required: bool,
    pub emphasize: bool,
    pub enabled: bool,
    pub show_in_discovery_document: bool,
    pub include_all_claims_for_user: bool,
    pub allow_unrestricted_introspection: bool,
    pub claims: Vec<ScopeClaim>,
    pub scope_secrets: Vec<Secret>,
}

impl Scope {
    /// Creates an enabled resource scope with no claims.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
            claims_rule: None,
            scope_type: ScopeType::Resource,
            required: false,
            emphasize: false,
            enabled: true,
            show_in_discovery_document: true,
            include_all_claims_for_user: false,
            allow_unrestricted_introspection: false,
            claims: Vec::new(),
            scope_secrets: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "name")?;
        validate_each(&self.claims, "claims", ScopeClaim::validate)?;
        validate_each(&self.scope_secrets, "scope_secrets", Secret::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::{Scope, ScopeType};

    #[test]
    fn scope_type_names_round_trip() {
        assert_eq!(ScopeType::NAMES, &["Identity", "Resource"]);
        for name in ScopeType::NAMES {
            let scope_type = name.parse::<ScopeType>().unwrap();
            assert_eq!(scope_type.name(), *name);
            assert_eq!(
                serde_json::to_value(scope_type).unwrap(),
                serde_json::json!(name)
            );
        }
        assert!("tenant".parse::<ScopeType>().is_err());
    }

    #[test]
    fn new_scope_is_an_enabled_resource() {
        let scope = Scope::new("api");
        assert_eq!(scope.scope_type, ScopeType::Resource);
        assert!(scope.enabled);
        assert!(scope.show_in_discovery_document);
        assert!(scope.validate().is_ok());
    }
}
