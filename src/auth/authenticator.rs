//! Authenticator implementation
//!
//! Builds the header pair attached to every API request.

use super::types::Credentials;
use crate::error::{Error, Result};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

/// Header carrying the raw API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Sign an empty claim set with HS256 using the account secret
pub fn sign_token(secret: &str) -> Result<String> {
    let claims = serde_json::Map::new();
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::JwtGeneration {
        message: format!("Failed to encode JWT: {e}"),
    })
}

/// Applies Stella Connect authentication to requests
#[derive(Clone)]
pub struct Authenticator {
    headers: HeaderMap,
}

impl Authenticator {
    /// Create an authenticator, signing the token once up front
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let token = sign_token(&credentials.secret)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&token)?);
        headers.insert(
            HeaderName::from_static(API_KEY_HEADER),
            header_value(&credentials.api_key)?,
        );

        Ok(Self { headers })
    }

    /// The auth headers, ready to be merged into a request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|e| Error::config(format!("Credential is not a valid header value: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
