//! GitHub GraphQL client for the contribution calendar.

use std::env;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::UpstreamError;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const USER_AGENT: &str = concat!("commitscape/", env!("CARGO_PKG_VERSION"));

const CALENDAR_QUERY: &str = r#"
query($userName: String!) {
  user(login: $userName) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
            weekday
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl GithubConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Reads `GITHUB_TOKEN` (required), `GITHUB_GRAPHQL_URL` and
    /// `GITHUB_HTTP_TIMEOUT_SECS` (optional).
    pub fn from_env() -> Result<Self, UpstreamError> {
        let token = env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| UpstreamError::Configuration("GITHUB_TOKEN is not set".into()))?;

        let mut config = Self::new(token);
        if let Ok(endpoint) = env::var("GITHUB_GRAPHQL_URL") {
            config.endpoint = endpoint;
        }
        if let Some(secs) = env::var("GITHUB_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| UpstreamError::Configuration(format!("HTTP client setup failed: {err}")))?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, UpstreamError> {
        Self::new(GithubConfig::from_env()?)
    }

    /// POST the calendar query and return the JSON envelope as-is.
    pub async fn fetch_envelope(&self, username: &str) -> Result<Value, UpstreamError> {
        debug!(username, endpoint = %self.config.endpoint, "requesting contribution calendar");

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.token)
            .json(&json!({
                "query": CALENDAR_QUERY,
                "variables": { "userName": username },
            }))
            .send()
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(username, status = status.as_u16(), "provider rejected calendar request");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| UpstreamError::Transport(format!("unreadable response body: {err}")))
    }
}
