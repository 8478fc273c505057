//! Optional-field patch for `Scope`.

use super::{
    append, map_objects, merge, merge_some, owned_text, parse_choice, scope_claim_from_bound,
    secret_from_bound,
};
use crate::model::scope::{Scope, ScopeClaim, ScopeType};
use crate::model::secret::Secret;
use crate::params::{BindError, BoundParams};

/// Caller-supplied scope settings; `name` is mandatory and not patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopePatch {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub claims_rule: Option<String>,
    pub scope_type: Option<ScopeType>,
    pub required: Option<bool>,
    pub emphasize: Option<bool>,
    pub enabled: Option<bool>,
    pub show_in_discovery_document: Option<bool>,
    pub include_all_claims_for_user: Option<bool>,
    pub allow_unrestricted_introspection: Option<bool>,
    pub claims: Option<Vec<ScopeClaim>>,
    pub scope_secrets: Option<Vec<Secret>>,
}

impl ScopePatch {
    pub fn from_bound(bound: &BoundParams) -> Result<Self, BindError> {
        Ok(Self {
            display_name: owned_text(bound, "DisplayName"),
            description: owned_text(bound, "Description"),
            claims_rule: owned_text(bound, "ClaimsRule"),
            scope_type: parse_choice::<ScopeType>(bound, "Type")?,
            required: bound.flag("Required"),
            emphasize: bound.flag("Emphasize"),
            enabled: bound.flag("Enabled"),
            show_in_discovery_document: bound.flag("ShowInDiscoveryDocument"),
            include_all_claims_for_user: bound.flag("IncludeAllClaimsForUser"),
            allow_unrestricted_introspection: bound.flag("AllowUnrestrictedIntrospection"),
            claims: map_objects(bound, "Claims", scope_claim_from_bound)?,
            scope_secrets: map_objects(bound, "ScopeSecrets", secret_from_bound)?,
        })
    }

    pub fn apply(self, mut base: Scope) -> Scope {
        merge_some(&mut base.display_name, self.display_name);
        merge_some(&mut base.description, self.description);
        merge_some(&mut base.claims_rule, self.claims_rule);
        merge(&mut base.scope_type, self.scope_type);
        merge(&mut base.required, self.required);
        merge(&mut base.emphasize, self.emphasize);
        merge(&mut base.enabled, self.enabled);
        merge(
            &mut base.show_in_discovery_document,
            self.show_in_discovery_document,
        );
        merge(
            &mut base.include_all_claims_for_user,
            self.include_all_claims_for_user,
        );
        merge(
            &mut base.allow_unrestricted_introspection,
            self.allow_unrestricted_introspection,
        );
        append(&mut base.claims, self.claims);
        append(&mut base.scope_secrets, self.scope_secrets);
        base
    }
}

#[cfg(test)]
mod tests {
    use super::ScopePatch;
    use crate::model::scope::{Scope, ScopeClaim};

    #[test]
    fn claims_are_appended_after_existing_ones() {
        let mut base = Scope::new("profile");
        base.claims.push(ScopeClaim::new("name"));

        let patch = ScopePatch {
            claims: Some(vec![ScopeClaim::new("family_name")]),
            ..ScopePatch::default()
        };
        let merged = patch.apply(base);
        let names: Vec<&str> = merged.claims.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["name", "family_name"]);
    }

    #[test]
    fn unset_flags_keep_constructor_defaults() {
        let patch = ScopePatch {
            emphasize: Some(true),
            ..ScopePatch::default()
        };
        let merged = patch.apply(Scope::new("api"));
        assert!(merged.emphasize);
        assert!(merged.enabled);
        assert!(merged.show_in_discovery_document);
        assert!(!merged.required);
    }
}
