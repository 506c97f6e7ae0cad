//! Authentication module
//!
//! Stella Connect authenticates every request with two headers: the raw API
//! key and a JWT signed with the account secret. The token carries no
//! claims and never expires within a run, so it is computed once.

mod authenticator;
mod types;

pub use authenticator::{sign_token, Authenticator, API_KEY_HEADER};
pub use types::Credentials;
