//! Client (relying application) domain model.
//!
//! # Responsibility
//! - Define the persisted shape of an OAuth2/OIDC client registration.
//! - Provide the canonical defaults every admin command merges onto.
//!
//! # Invariants
//! - `client_id` and `client_name` are never blank.
//! - Lifetime fields are in seconds and never exceed `MAX_LIFETIME_SECONDS`.
//! - `allow_access_to_all_*` flags are stored independently of the explicit
//!   allow-lists; no precedence between them is applied here.

use super::secret::{ClientClaim, Secret};
use super::{require_lifetime, require_text, validate_each, ValidationError};
use serde::{Deserialize, Serialize};

/// Grant flow a client is permitted to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flow {
    AuthorizationCode,
    Implicit,
    Hybrid,
    ClientCredentials,
    ResourceOwner,
    Custom,
    AuthorizationCodeWithProofKey,
    HybridWithProofKey,
}

/// How refresh tokens are treated on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenUsage {
    /// The same refresh token handle is kept across refreshes.
    ReUse,
    /// Every refresh issues a new handle.
    OneTimeOnly,
}

/// Refresh token expiration policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenExpiration {
    Sliding,
    Absolute,
}

/// Access token representation handed to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessTokenType {
    /// Self-contained signed token.
    Jwt,
    /// Opaque handle resolved through introspection.
    Reference,
}

named_variants!(
    Flow,
    "flow",
    [
        AuthorizationCode,
        Implicit,
        Hybrid,
        ClientCredentials,
        ResourceOwner,
        Custom,
        AuthorizationCodeWithProofKey,
        HybridWithProofKey,
    ]
);
named_variants!(TokenUsage, "token usage", [ReUse, OneTimeOnly]);
named_variants!(TokenExpiration, "token expiration", [Sliding, Absolute]);
named_variants!(AccessTokenType, "access token type", [Jwt, Reference]);

/// Registered relying application permitted to request tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: String,
    pub client_name: String,
    pub enabled: bool,
    pub client_secrets: Vec<Secret>,
    pub client_uri: Option<String>,
    pub logo_uri: Option<String>,

    pub require_consent: bool,
    pub allow_remember_consent: bool,
    pub enable_local_login: bool,

    pub flow: Flow,

    /// Seconds.
    pub identity_token_lifetime: u32,
    /// Seconds.
    pub access_token_lifetime: u32,
    /// Seconds.
    pub authorization_code_lifetime: u32,
    /// Seconds.
    pub absolute_refresh_token_lifetime: u32,
    /// Seconds.
    pub sliding_refresh_token_lifetime: u32,
    pub refresh_token_usage: TokenUsage,
    pub refresh_token_expiration: TokenExpiration,
    pub access_token_type: AccessTokenType,

    pub identity_provider_restrictions: Vec<String>,
    pub post_logout_redirect_uris: Vec<String>,
    pub redirect_uris: Vec<String>,
    pub allowed_scopes: Vec<String>,
    pub allowed_custom_grant_types: Vec<String>,
    pub allowed_cors_origins: Vec<String>,
    pub claims: Vec<ClientClaim>,

    pub include_jwt_id: bool,
    pub always_send_client_claims: bool,
    pub prefix_client_claims: bool,
    pub allow_client_credentials_only: bool,
    pub update_access_token_claims_on_refresh: bool,
    pub allow_access_to_all_scopes: bool,
    pub allow_access_to_all_custom_grant_types: bool,
    pub allow_access_tokens_via_browser: bool,

    pub logout_uri: Option<String>,
    pub logout_session_required: bool,
    pub require_sign_out_prompt: bool,
}

impl Client {
    pub const DEFAULT_IDENTITY_TOKEN_LIFETIME: u32 = 300;
    pub const DEFAULT_ACCESS_TOKEN_LIFETIME: u32 = 3600;
    pub const DEFAULT_AUTHORIZATION_CODE_LIFETIME: u32 = 300;
    /// 30 days.
    pub const DEFAULT_ABSOLUTE_REFRESH_TOKEN_LIFETIME: u32 = 2_592_000;
    /// 15 days.
    pub const DEFAULT_SLIDING_REFRESH_TOKEN_LIFETIME: u32 = 1_296_000;

    /// Creates a client with canonical defaults for every optional field.
    pub fn new(client_id: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_name: client_name.into(),
            enabled: true,
            client_secrets: Vec::new(),
            client_uri: None,
            logo_uri: None,
            require_consent: true,
            allow_remember_consent: true,
            enable_local_login: true,
            flow: Flow::Implicit,
            identity_token_lifetime: Self::DEFAULT_IDENTITY_TOKEN_LIFETIME,
            access_token_lifetime: Self::DEFAULT_ACCESS_TOKEN_LIFETIME,
            authorization_code_lifetime: Self::DEFAULT_AUTHORIZATION_CODE_LIFETIME,
            absolute_refresh_token_lifetime: Self::DEFAULT_ABSOLUTE_REFRESH_TOKEN_LIFETIME,
            sliding_refresh_token_lifetime: Self::DEFAULT_SLIDING_REFRESH_TOKEN_LIFETIME,
            refresh_token_usage: TokenUsage::OneTimeOnly,
            refresh_token_expiration: TokenExpiration::Absolute,
            access_token_type: AccessTokenType::Jwt,
            identity_provider_restrictions: Vec::new(),
            post_logout_redirect_uris: Vec::new(),
            redirect_uris: Vec::new(),
            allowed_scopes: Vec::new(),
            allowed_custom_grant_types: Vec::new(),
            allowed_cors_origins: Vec::new(),
            claims: Vec::new(),
            include_jwt_id: false,
            always_send_client_claims: false,
            prefix_client_claims: true,
            allow_client_credentials_only: false,
            update_access_token_claims_on_refresh: false,
            allow_access_to_all_scopes: false,
            allow_access_to_all_custom_grant_types: false,
            allow_access_tokens_via_browser: true,
            logout_uri: None,
            logout_session_required: true,
            require_sign_out_prompt: false,
        }
    }

    /// Validates identifier and lifetime invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.client_id, "client_id")?;
        require_text(&self.client_name, "client_name")?;
        require_lifetime(self.identity_token_lifetime, "identity_token_lifetime")?;
        require_lifetime(self.access_token_lifetime, "access_token_lifetime")?;
        require_lifetime(
            self.authorization_code_lifetime,
            "authorization_code_lifetime",
        )?;
        require_lifetime(
            self.absolute_refresh_token_lifetime,
            "absolute_refresh_token_lifetime",
        )?;
        require_lifetime(
            self.sliding_refresh_token_lifetime,
            "sliding_refresh_token_lifetime",
        )?;
        validate_each(&self.client_secrets, "client_secrets", Secret::validate)?;
        validate_each(&self.claims, "claims", ClientClaim::validate)?;
        Ok(())
    }
}
