//! HTTP client with retry
//!
//! Every request goes through a single-attempt operation that classifies
//! its outcome, and a retry loop that decides whether to try again.

use crate::auth::{Authenticator, Credentials};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.stellaconnect.net";

/// Total attempts per request, including the first one
pub const MAX_GET_ATTEMPTS: u32 = 7;

/// Wait between failed attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5 * 60);

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Configuration for the Stella Connect client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root that bare paths are resolved against
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of attempts per request
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_attempts: MAX_GET_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            user_agent: format!("tap-stella/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the attempt cap
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set the delay between attempts
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters appended to the URL
    pub query: Vec<(String, String)>,
    /// Extra headers; these win over the auth headers on collision
    pub headers: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

/// Outcome of one request attempt
#[derive(Debug)]
enum Attempt {
    Success(JsonValue),
    Retry(Error),
    Fatal(Error),
}

impl Attempt {
    fn failed(err: Error) -> Self {
        if err.is_retryable() {
            Self::Retry(err)
        } else {
            Self::Fatal(err)
        }
    }
}

/// Authenticated client for the Stella Connect API
pub struct StellaClient {
    client: Client,
    config: ClientConfig,
    auth: Authenticator,
}

impl StellaClient {
    /// Create a client, signing the auth token once for its lifetime
    pub fn new(credentials: &Credentials, config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            auth: Authenticator::new(credentials)?,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET a path or absolute URL and parse the JSON body
    pub async fn get(&self, path_or_url: &str) -> Result<JsonValue> {
        self.get_with_config(path_or_url, RequestConfig::default()).await
    }

    /// GET with extra query parameters and headers
    pub async fn get_with_config(
        &self,
        path_or_url: &str,
        config: RequestConfig,
    ) -> Result<JsonValue> {
        let url = self.build_url(path_or_url);
        let max_attempts = self.config.max_attempts.max(1);
        let headers = self.build_headers(&config)?;

        info!(url = %url, "Stella Connect GET");

        let mut attempt = 1;
        loop {
            match self.attempt(&url, &config, headers.clone()).await {
                Attempt::Success(body) => {
                    debug!(url = %url, attempt, "Stella Connect GET succeeded");
                    return Ok(body);
                }
                Attempt::Fatal(e) => {
                    warn!(url = %url, attempt, error = %e, "Stella Connect GET failed, not retrying");
                    return Err(e);
                }
                Attempt::Retry(e) if attempt < max_attempts => {
                    info!(
                        url = %url,
                        attempt,
                        max_attempts,
                        error = %e,
                        delay_secs = self.config.retry_delay.as_secs(),
                        "Stella Connect: unable to get response, will retry"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                    attempt += 1;
                }
                Attempt::Retry(e) => {
                    warn!(url = %url, attempt, error = %e, "Stella Connect GET retries exhausted");
                    return Err(Error::RetriesExhausted {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
            }
        }
    }

    /// Resolve a bare path against the base URL; absolute URLs pass through
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Auth headers overlaid with the request's own headers
    fn build_headers(&self, config: &RequestConfig) -> Result<HeaderMap> {
        let mut headers = self.auth.headers().clone();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::config(format!("Invalid header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::config(format!("Invalid value for header '{key}': {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Issue one request and classify the result
    async fn attempt(&self, url: &str, config: &RequestConfig, headers: HeaderMap) -> Attempt {
        let mut req = self.client.get(url).headers(headers);
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => return Attempt::failed(Error::Http(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Attempt::failed(Error::http_status(status.as_u16(), url, body));
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return Attempt::failed(Error::Http(e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(body) => Attempt::Success(body),
            Err(e) => Attempt::Fatal(Error::JsonParse(e)),
        }
    }
}

impl std::fmt::Debug for StellaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StellaClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
