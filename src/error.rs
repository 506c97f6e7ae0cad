//! Error types for tap-stella
//!
//! Every fallible operation in the crate returns `Result<T, Error>`.
//! Retryable conditions never escape the HTTP client; anything that
//! reaches the caller is fatal for the run.

use thiserror::Error;

/// The main error type for tap-stella
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("JWT generation failed: {message}")]
    JwtGeneration { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Request failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unexpected response from {url}: {message}")]
    UnexpectedResponse { url: String, message: String },

    // ============================================================================
    // Catalog / State Errors
    // ============================================================================
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Create an unexpected response error
    pub fn unexpected_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Whether the client retries a request that failed with this error.
    ///
    /// Connection-level failures and 5xx statuses are retried; every other
    /// status fails fast.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => !e.is_decode() && !e.is_builder() && e.status().is_none(),
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// 5xx is the only retryable status class
pub(crate) fn is_retryable_status(status: u16) -> bool {
    (500..600).contains(&status)
}

/// Result type alias for tap-stella
pub type Result<T> = std::result::Result<T, Error>;
