//! Run configuration
//!
//! The tap is configured with a JSON file holding the account credentials
//! and optional `created_at` filters. Filter values are forwarded to the API
//! verbatim; the tap never parses them.

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration loaded from `--config`
#[derive(Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// API key sent as `x-api-key`
    #[serde(default)]
    pub api_key: String,

    /// Secret used to sign the `Authorization` token
    #[serde(default)]
    pub secret: String,

    /// Only fetch records created at or after this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_gte: Option<String>,

    /// Only fetch records created at or before this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_lte: Option<String>,

    /// API root override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// User agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl TapConfig {
    /// Create a config from credentials alone
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
            created_at_gte: None,
            created_at_lte: None,
            base_url: None,
            user_agent: None,
        }
    }

    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate config JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the credentials are present
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.secret.trim().is_empty() {
            return Err(Error::missing_field("secret"));
        }
        Ok(())
    }

    /// API credentials
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.api_key, &self.secret)
    }

    /// Client settings derived from this config
    pub fn client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder()
            .base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// Date filters to forward on every paginated request
    pub fn date_filters(&self) -> [(&'static str, Option<String>); 2] {
        [
            ("created_at_gte", self.created_at_gte.clone()),
            ("created_at_lte", self.created_at_lte.clone()),
        ]
    }
}

impl std::fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapConfig")
            .field("created_at_gte", &self.created_at_gte)
            .field("created_at_lte", &self.created_at_lte)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}
