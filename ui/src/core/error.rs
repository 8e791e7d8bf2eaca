//! Error taxonomy for a single fetch / normalize / export attempt.

use thiserror::Error;

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Every failure the pipeline reports to its caller. None of them are fatal:
/// each belongs to the attempt that produced it and the next attempt starts clean.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The provider could not be reached (network, HTTP status, server misconfiguration).
    #[error("could not reach the calendar provider: {0}")]
    Transport(String),

    /// The provider answered but rejected the request (unknown user, GraphQL errors).
    #[error("calendar provider error: {0}")]
    Provider(String),

    /// The payload does not match the week-grouped calendar contract.
    #[error("malformed calendar payload: {0}")]
    MalformedPayload(String),

    /// Well-formed response without a single contribution day.
    #[error("no contribution days found for {username}")]
    EmptyDataset { username: String },

    /// Export requested while nothing is rendered.
    #[error("no render surface is mounted")]
    NoSurfaceMounted,

    /// The mounted surface could not be rasterized.
    #[error("snapshot rendering failed: {0}")]
    Render(String),
}

impl CalendarError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }

    /// Only transport failures are worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Stable identifier, handy for log fields and CSS modifiers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Provider(_) => "provider",
            Self::MalformedPayload(_) => "malformed",
            Self::EmptyDataset { .. } => "empty",
            Self::NoSurfaceMounted => "no-surface",
            Self::Render(_) => "render",
        }
    }
}

impl From<api::UpstreamError> for CalendarError {
    fn from(err: api::UpstreamError) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_is_retryable() {
        assert!(CalendarError::Transport("timeout".into()).is_retryable());
        assert!(!CalendarError::Provider("unknown user".into()).is_retryable());
        assert!(!CalendarError::malformed("weeks").is_retryable());
        assert!(!CalendarError::NoSurfaceMounted.is_retryable());
    }

    #[test]
    fn upstream_failures_become_transport_errors() {
        let err: CalendarError = api::UpstreamError::Status {
            status: 502,
            body: "bad gateway".into(),
        }
        .into();
        assert_eq!(err.kind(), "transport");
    }
}
