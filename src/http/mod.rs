//! HTTP client module
//!
//! Authenticated GET requests against the Stella Connect API with bounded,
//! fixed-delay retries.
//!
//! # Retry policy
//!
//! - **2xx**: the JSON body is returned
//! - **5xx / connection failure / timeout**: retried after a fixed delay, up
//!   to the attempt cap, then surfaced as [`Error::RetriesExhausted`]
//! - **anything else (4xx, ...)**: returned immediately, no retry
//!
//! [`Error::RetriesExhausted`]: crate::Error::RetriesExhausted

mod client;

pub use client::{
    ClientConfig, ClientConfigBuilder, RequestConfig, StellaClient, DEFAULT_BASE_URL,
    DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT, MAX_GET_ATTEMPTS,
};
