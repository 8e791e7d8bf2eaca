//! Provider envelope handling and the fetch → extract → normalize pipeline.

use serde_json::Value;

use super::calendar::{self, CalendarDataset};
use super::error::{CalendarError, CalendarResult};

/// Pull the calendar object out of a GraphQL envelope.
pub fn extract_calendar(mut envelope: Value) -> CalendarResult<Value> {
    if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages = errors
                .iter()
                .map(|err| {
                    err.get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                })
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CalendarError::Provider(messages));
        }
    }

    let user = envelope
        .get_mut("data")
        .and_then(|data| data.get_mut("user"))
        .ok_or_else(|| CalendarError::malformed("response has no `data.user` field"))?;

    if user.is_null() {
        return Err(CalendarError::Provider("user not found".into()));
    }

    user.get_mut("contributionsCollection")
        .and_then(|collection| collection.get_mut("contributionCalendar"))
        .map(Value::take)
        .filter(|calendar| !calendar.is_null())
        .ok_or_else(|| CalendarError::malformed("response has no contribution calendar"))
}

/// Full pipeline for one username: fetch, unwrap the envelope, normalize.
pub async fn load_calendar(username: &str) -> CalendarResult<CalendarDataset> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CalendarError::Provider("a username is required".into()));
    }

    let envelope = fetch_envelope(username).await?;
    let calendar = extract_calendar(envelope)?;
    calendar::normalize(username, calendar)
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_envelope(username: &str) -> CalendarResult<Value> {
    let client = api::github::GithubClient::from_env()?;
    Ok(client.fetch_envelope(username).await?)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_envelope(username: &str) -> CalendarResult<Value> {
    api::contribution_calendar(username.to_string())
        .await
        .map_err(|err| CalendarError::Transport(err.to_string()))
}
