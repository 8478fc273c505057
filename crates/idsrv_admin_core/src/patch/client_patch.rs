//! Optional-field patch for `Client`.

use super::{
    append, client_claim_from_bound, map_objects, merge, merge_some, owned_list, owned_text,
    parse_choice, secret_from_bound,
};
use crate::model::client::{AccessTokenType, Client, Flow, TokenExpiration, TokenUsage};
use crate::model::secret::{ClientClaim, Secret};
use crate::params::{BindError, BoundParams};

/// Caller-supplied client settings; every field is optional.
///
/// Identity fields (`client_id`, `client_name`) are not part of the patch:
/// they are mandatory and go to `Client::new`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub enabled: Option<bool>,
    pub client_secrets: Option<Vec<Secret>>,
    pub client_uri: Option<String>,
    pub logo_uri: Option<String>,
    pub require_consent: Option<bool>,
    pub allow_remember_consent: Option<bool>,
    pub enable_local_login: Option<bool>,
    pub flow: Option<Flow>,
    pub identity_token_lifetime: Option<u32>,
    pub access_token_lifetime: Option<u32>,
    pub authorization_code_lifetime: Option<u32>,
    pub absolute_refresh_token_lifetime: Option<u32>,
    pub sliding_refresh_token_lifetime: Option<u32>,
    pub refresh_token_usage: Option<TokenUsage>,
    pub refresh_token_expiration: Option<TokenExpiration>,
    pub access_token_type: Option<AccessTokenType>,
    pub identity_provider_restrictions: Option<Vec<String>>,
    pub post_logout_redirect_uris: Option<Vec<String>>,
    pub redirect_uris: Option<Vec<String>>,
    pub allowed_scopes: Option<Vec<String>>,
    pub include_jwt_id: Option<bool>,
    pub always_send_client_claims: Option<bool>,
    pub prefix_client_claims: Option<bool>,
    pub allowed_custom_grant_types: Option<Vec<String>>,
    pub claims: Option<Vec<ClientClaim>>,
    pub allow_client_credentials_only: Option<bool>,
    pub update_access_token_claims_on_refresh: Option<bool>,
    pub allowed_cors_origins: Option<Vec<String>>,
    pub allow_access_to_all_scopes: Option<bool>,
    pub allow_access_to_all_custom_grant_types: Option<bool>,
    pub allow_access_tokens_via_browser: Option<bool>,
    pub logout_session_required: Option<bool>,
    pub require_sign_out_prompt: Option<bool>,
    pub logout_uri: Option<String>,
}

impl ClientPatch {
    /// Reads every optional `new-client` parameter out of a bound set.
    pub fn from_bound(bound: &BoundParams) -> Result<Self, BindError> {
        Ok(Self {
            enabled: bound.flag("Enabled"),
            client_secrets: map_objects(bound, "ClientSecrets", secret_from_bound)?,
            client_uri: owned_text(bound, "ClientUri"),
            logo_uri: owned_text(bound, "LogoUri"),
            require_consent: bound.flag("RequireConsent"),
            allow_remember_consent: bound.flag("AllowRememberConsent"),
            enable_local_login: bound.flag("EnableLocalLogin"),
            flow: parse_choice(bound, "Flow")?,
            identity_token_lifetime: bound.seconds("IdentityTokenLifetime")?,
            access_token_lifetime: bound.seconds("AccessTokenLifetime")?,
            authorization_code_lifetime: bound.seconds("AuthorizationCodeLifetime")?,
            absolute_refresh_token_lifetime: bound.seconds("AbsoluteRefreshTokenLifetime")?,
            sliding_refresh_token_lifetime: bound.seconds("SlidingRefreshTokenLifetime")?,
            refresh_token_usage: parse_choice(bound, "RefreshTokenUsage")?,
            refresh_token_expiration: parse_choice(bound, "RefreshTokenExpiration")?,
            access_token_type: parse_choice(bound, "AccessTokenType")?,
            identity_provider_restrictions: owned_list(bound, "IdentityProviderRestrictions"),
            post_logout_redirect_uris: owned_list(bound, "PostLogoutRedirectUris"),
            redirect_uris: owned_list(bound, "RedirectUris"),
            allowed_scopes: owned_list(bound, "AllowedScopes"),
            include_jwt_id: bound.flag("IncludeJwtId"),
            always_send_client_claims: bound.flag("AlwaysSendClientClaims"),
            prefix_client_claims: bound.flag("PrefixClientClaims"),
            allowed_custom_grant_types: owned_list(bound, "AllowedCustomGrantTypes"),
            claims: map_objects(bound, "Claims", client_claim_from_bound)?,
            allow_client_credentials_only: bound.flag("AllowClientCredentialsOnly"),
            update_access_token_claims_on_refresh: bound
                .flag("UpdateAccessTokenClaimsOnRefresh"),
            allowed_cors_origins: owned_list(bound, "AllowedCorsOrigins"),
            allow_access_to_all_scopes: bound.flag("AllowAccessToAllScopes"),
            allow_access_to_all_custom_grant_types: bound
                .flag("AllowAccessToAllCustomGrantTypes"),
            allow_access_tokens_via_browser: bound.flag("AllowAccessTokensViaBrowser"),
            logout_session_required: bound.flag("LogoutSessionRequired"),
            require_sign_out_prompt: bound.flag("RequireSignOutPrompt"),
            logout_uri: owned_text(bound, "LogoutUri"),
        })
    }

    /// Merges this patch onto `base`, keeping base values for `None` fields.
    pub fn apply(self, mut base: Client) -> Client {
        merge(&mut base.enabled, self.enabled);
        append(&mut base.client_secrets, self.client_secrets);
        merge_some(&mut base.client_uri, self.client_uri);
        merge_some(&mut base.logo_uri, self.logo_uri);
        merge(&mut base.require_consent, self.require_consent);
        merge(&mut base.allow_remember_consent, self.allow_remember_consent);
        merge(&mut base.enable_local_login, self.enable_local_login);
        merge(&mut base.flow, self.flow);
        merge(
            &mut base.identity_token_lifetime,
            self.identity_token_lifetime,
        );
        merge(&mut base.access_token_lifetime, self.access_token_lifetime);
        merge(
            &mut base.authorization_code_lifetime,
            self.authorization_code_lifetime,
        );
        merge(
            &mut base.absolute_refresh_token_lifetime,
            self.absolute_refresh_token_lifetime,
        );
        merge(
            &mut base.sliding_refresh_token_lifetime,
            self.sliding_refresh_token_lifetime,
        );
        merge(&mut base.refresh_token_usage, self.refresh_token_usage);
        merge(
            &mut base.refresh_token_expiration,
            self.refresh_token_expiration,
        );
        merge(&mut base.access_token_type, self.access_token_type);
        append(
            &mut base.identity_provider_restrictions,
            self.identity_provider_restrictions,
        );
        append(
            &mut base.post_logout_redirect_uris,
            self.post_logout_redirect_uris,
        );
        append(&mut base.redirect_uris, self.redirect_uris);
        append(&mut base.allowed_scopes, self.allowed_scopes);
        merge(&mut base.include_jwt_id, self.include_jwt_id);
        merge(
            &mut base.always_send_client_claims,
            self.always_send_client_claims,
        );
        merge(&mut base.prefix_client_claims, self.prefix_client_claims);
        append(
            &mut base.allowed_custom_grant_types,
            self.allowed_custom_grant_types,
        );
        append(&mut base.claims, self.claims);
        merge(
            &mut base.allow_client_credentials_only,
            self.allow_client_credentials_only,
        );
        merge(
            &mut base.update_access_token_claims_on_refresh,
            self.update_access_token_claims_on_refresh,
        );
        append(&mut base.allowed_cors_origins, self.allowed_cors_origins);
        merge(
            &mut base.allow_access_to_all_scopes,
            self.allow_access_to_all_scopes,
        );
        merge(
            &mut base.allow_access_to_all_custom_grant_types,
            self.allow_access_to_all_custom_grant_types,
        );
        merge(
            &mut base.allow_access_tokens_via_browser,
            self.allow_access_tokens_via_browser,
        );
        merge(
            &mut base.logout_session_required,
            self.logout_session_required,
        );
        merge(
            &mut base.require_sign_out_prompt,
            self.require_sign_out_prompt,
        );
        merge_some(&mut base.logout_uri, self.logout_uri);
        base
    }
}
