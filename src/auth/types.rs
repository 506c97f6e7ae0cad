//! Credential types

use serde::{Deserialize, Serialize};

/// API credentials for a Stella Connect account
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Sent verbatim as the `x-api-key` header
    pub api_key: String,
    /// HMAC secret used to sign the `Authorization` token
    pub secret: String,
}

impl Credentials {
    /// Create credentials from an API key and signing secret
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("secret", &"<redacted>")
            .finish()
    }
}
