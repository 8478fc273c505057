//! Static parameter schema tables for every admin command.
//!
//! Each table maps an external parameter name to its kind, whether it is
//! mandatory, and the validation rule applied after type conversion.

use crate::model::client::{AccessTokenType, Flow, TokenExpiration, TokenUsage};
use crate::model::scope::ScopeType;
use crate::model::MAX_LIFETIME_SECONDS;

/// Expected shape of a raw parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Bool,
    Int,
    /// One of the listed names (case-insensitive).
    Choice(&'static [&'static str]),
    /// Array of strings, or one comma-separated string.
    TextList,
    /// Array of objects, each bound with the nested schema.
    ObjectList(&'static Schema),
}

impl ParamKind {
    pub fn describe(&self) -> String {
        match self {
            Self::Text => "text".to_string(),
            Self::Bool => "bool".to_string(),
            Self::Int => "integer".to_string(),
            Self::Choice(names) => format!("one of {}", names.join("|")),
            Self::TextList => "text list".to_string(),
            Self::ObjectList(schema) => format!("list of {}", schema.command),
        }
    }
}

/// Validation applied after conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    None,
    NotBlank,
    Range { min: i64, max: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub rule: Rule,
}

/// Parameter table of one command.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub command: &'static str,
    pub params: &'static [ParamSpec],
}

impl Schema {
    /// Finds a parameter spec by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&ParamSpec> {
        self.params
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name.trim()))
    }
}

const fn optional(name: &'static str, kind: ParamKind) -> ParamSpec {
    ParamSpec {
        name,
        kind,
        required: false,
        rule: Rule::None,
    }
}

const fn mandatory(name: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Text,
        required: true,
        rule: Rule::NotBlank,
    }
}

const fn lifetime(name: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Int,
        required: false,
        rule: Rule::Range {
            min: 0,
            max: MAX_LIFETIME_SECONDS as i64,
        },
    }
}

const fn flag(name: &'static str) -> ParamSpec {
    optional(name, ParamKind::Bool)
}

const fn text(name: &'static str) -> ParamSpec {
    optional(name, ParamKind::Text)
}

/// Optional text that must not be blank when supplied.
const fn non_blank(name: &'static str) -> ParamSpec {
    ParamSpec {
        rule: Rule::NotBlank,
        ..text(name)
    }
}

const fn list(name: &'static str) -> ParamSpec {
    optional(name, ParamKind::TextList)
}

pub static NEW_CLIENT_SECRET: Schema = Schema {
    command: "new-client-secret",
    params: &[
        mandatory("Value"),
        text("Description"),
        optional("Expiration", ParamKind::Int),
        non_blank("Type"),
    ],
};

pub static NEW_CLIENT_CLAIM: Schema = Schema {
    command: "new-client-claim",
    params: &[mandatory("Type"), mandatory("Value")],
};

pub static NEW_SCOPE_CLAIM: Schema = Schema {
    command: "new-scope-claim",
    params: &[
        mandatory("Name"),
        text("Description"),
        flag("AlwaysIncludeInIdToken"),
    ],
};

pub static NEW_CLIENT: Schema = Schema {
    command: "new-client",
    params: &[
        flag("Enabled"),
        mandatory("ClientId"),
        optional("ClientSecrets", ParamKind::ObjectList(&NEW_CLIENT_SECRET)),
        mandatory("ClientName"),
        text("ClientUri"),
        text("LogoUri"),
        flag("RequireConsent"),
        flag("AllowRememberConsent"),
        flag("EnableLocalLogin"),
        optional("Flow", ParamKind::Choice(Flow::NAMES)),
        lifetime("IdentityTokenLifetime"),
        lifetime("AccessTokenLifetime"),
        lifetime("AuthorizationCodeLifetime"),
        lifetime("AbsoluteRefreshTokenLifetime"),
        lifetime("SlidingRefreshTokenLifetime"),
        optional("RefreshTokenUsage", ParamKind::Choice(TokenUsage::NAMES)),
        optional(
            "RefreshTokenExpiration",
            ParamKind::Choice(TokenExpiration::NAMES),
        ),
        optional("AccessTokenType", ParamKind::Choice(AccessTokenType::NAMES)),
        list("IdentityProviderRestrictions"),
        list("PostLogoutRedirectUris"),
        list("RedirectUris"),
        list("AllowedScopes"),
        flag("IncludeJwtId"),
        flag("AlwaysSendClientClaims"),
        flag("PrefixClientClaims"),
        list("AllowedCustomGrantTypes"),
        optional("Claims", ParamKind::ObjectList(&NEW_CLIENT_CLAIM)),
        flag("AllowClientCredentialsOnly"),
        flag("UpdateAccessTokenClaimsOnRefresh"),
        list("AllowedCorsOrigins"),
        flag("AllowAccessToAllScopes"),
        flag("AllowAccessToAllCustomGrantTypes"),
        flag("AllowAccessTokensViaBrowser"),
        flag("LogoutSessionRequired"),
        flag("RequireSignOutPrompt"),
        text("LogoutUri"),
    ],
};

pub static NEW_SCOPE: Schema = Schema {
    command: "new-scope",
    params: &[
        mandatory("Name"),
        text("DisplayName"),
        text("Description"),
        text("ClaimsRule"),
        optional("Type", ParamKind::Choice(ScopeType::NAMES)),
        flag("Required"),
        flag("Emphasize"),
        flag("Enabled"),
        flag("ShowInDiscoveryDocument"),
        flag("IncludeAllClaimsForUser"),
        flag("AllowUnrestrictedIntrospection"),
        optional("Claims", ParamKind::ObjectList(&NEW_SCOPE_CLAIM)),
        optional("ScopeSecrets", ParamKind::ObjectList(&NEW_CLIENT_SECRET)),
    ],
};

pub static GET_SCOPES: Schema = Schema {
    command: "get-scopes",
    params: &[flag("PublicOnly")],
};

pub static REMOVE_CLIENT: Schema = Schema {
    command: "remove-client",
    params: &[mandatory("ClientId")],
};

pub static REMOVE_SCOPE: Schema = Schema {
    command: "remove-scope",
    params: &[mandatory("Name")],
};

/// Shared by commands that take no parameters.
pub static NO_PARAMS: Schema = Schema {
    command: "none",
    params: &[],
};

#[cfg(test)]
mod tests {
    use super::{ParamKind, Rule, NEW_CLIENT, NEW_SCOPE};
    use std::collections::HashSet;

    #[test]
    fn parameter_names_are_unique_ignoring_case() {
        for schema in [&NEW_CLIENT, &NEW_SCOPE] {
            let mut seen = HashSet::new();
            for spec in schema.params {
                assert!(
                    seen.insert(spec.name.to_ascii_lowercase()),
                    "duplicate parameter {} in {}",
                    spec.name,
                    schema.command
                );
            }
        }
    }

    #[test]
    fn lifetimes_are_range_checked() {
        let spec = NEW_CLIENT.find("accesstokenlifetime").unwrap();
        assert_eq!(spec.kind, ParamKind::Int);
        assert_eq!(
            spec.rule,
            Rule::Range {
                min: 0,
                max: i32::MAX as i64
            }
        );
    }

    #[test]
    fn identifiers_are_mandatory() {
        assert!(NEW_CLIENT.find("ClientId").unwrap().required);
        assert!(NEW_CLIENT.find("ClientName").unwrap().required);
        assert!(NEW_SCOPE.find("Name").unwrap().required);
        assert!(!NEW_SCOPE.find("DisplayName").unwrap().required);
    }
}
