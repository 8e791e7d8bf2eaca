//! Upstream calendar provider access.
//!
//! Native builds talk to GitHub directly through [`github::GithubClient`].
//! The web build goes through the [`contribution_calendar`] server function so
//! the access token never leaves the server.

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub mod github;

/// Failure to obtain a response body from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum UpstreamError {
    #[error("server configuration error: {0}")]
    Configuration(String),

    #[error("request to the provider failed: {0}")]
    Transport(String),

    #[error("provider responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Fetch the raw GraphQL envelope for `username`.
///
/// The envelope is returned untouched (including any GraphQL `errors`); the
/// caller decides what counts as a provider error.
#[server(ContributionCalendar)]
pub async fn contribution_calendar(
    username: String,
) -> Result<serde_json::Value, ServerFnError> {
    let client = github::GithubClient::from_env().map_err(ServerFnError::new)?;
    client
        .fetch_envelope(&username)
        .await
        .map_err(ServerFnError::new)
}
