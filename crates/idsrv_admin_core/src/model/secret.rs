//! Secrets and static claims attached to clients and scopes.

use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Shared secret used to authenticate a client or a scope (introspection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub value: String,
    pub description: Option<String>,
    /// Unix epoch milliseconds. `None` means the secret never expires.
    pub expiration: Option<i64>,
    pub secret_type: String,
}

impl Secret {
    pub const DEFAULT_TYPE: &'static str = "SharedSecret";

    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
            expiration: None,
            secret_type: Self::DEFAULT_TYPE.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.value, "value")?;
        require_text(&self.secret_type, "secret_type")
    }
}

/// Claim statically attached to every token issued for a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientClaim {
    pub claim_type: String,
    pub value: String,
}

impl ClientClaim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.claim_type, "claim_type")?;
        require_text(&self.value, "value")
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientClaim, Secret};
    use crate::model::ValidationError;

    #[test]
    fn claim_requires_type_and_value() {
        assert!(ClientClaim::new("role", "admin").validate().is_ok());
        assert_eq!(
            ClientClaim::new(" ", "admin").validate().unwrap_err(),
            ValidationError::BlankField("claim_type")
        );
        assert_eq!(
            ClientClaim::new("role", "").validate().unwrap_err(),
            ValidationError::BlankField("value")
        );
    }

    #[test]
    fn secret_rejects_blank_type() {
        let mut secret = Secret::new("pw");
        secret.secret_type = "  ".to_string();
        assert_eq!(
            secret.validate().unwrap_err(),
            ValidationError::BlankField("secret_type")
        );
    }
}
