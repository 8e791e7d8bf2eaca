//! Current-dataset holder with a stale-response guard.
//!
//! Every fetch gets a [`RequestTicket`] carrying a generation number. Only the
//! ticket of the most recent `begin` may resolve the session; responses for
//! superseded requests are dropped no matter when they arrive.

use std::sync::Arc;

use super::calendar::CalendarDataset;
use super::error::CalendarError;
use super::stats::Stats;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Idle,
    Loading {
        username: String,
    },
    Ready {
        username: String,
        dataset: Arc<CalendarDataset>,
        stats: Stats,
    },
    Failed {
        username: String,
        error: CalendarError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSession {
    latest: u64,
    phase: SessionPhase,
}

impl Default for ContributionSession {
    fn default() -> Self {
        Self {
            latest: 0,
            phase: SessionPhase::Idle,
        }
    }
}

impl ContributionSession {
    /// Start a new request. Any loaded dataset is dropped immediately.
    pub fn begin(&mut self, username: &str) -> RequestTicket {
        self.latest += 1;
        let username = username.trim().to_string();
        self.phase = SessionPhase::Loading {
            username: username.clone(),
        };
        tracing::info!(username = %username, generation = self.latest, "calendar request started");
        RequestTicket {
            generation: self.latest,
            username,
        }
    }

    /// Apply the outcome of `ticket`'s request. Returns `false` when the ticket
    /// has been superseded and the outcome was discarded.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<CalendarDataset, CalendarError>,
    ) -> bool {
        if ticket.generation != self.latest {
            tracing::debug!(
                username = %ticket.username,
                generation = ticket.generation,
                latest = self.latest,
                "dropping stale calendar response"
            );
            return false;
        }

        self.phase = match outcome {
            Ok(dataset) => {
                let stats = Stats::from_dataset(&dataset);
                tracing::info!(
                    username = %ticket.username,
                    days = stats.total_days,
                    active = stats.active_days,
                    "calendar loaded"
                );
                SessionPhase::Ready {
                    username: ticket.username,
                    dataset: Arc::new(dataset),
                    stats,
                }
            }
            Err(error) => {
                tracing::warn!(
                    username = %ticket.username,
                    kind = error.kind(),
                    %error,
                    "calendar request failed"
                );
                SessionPhase::Failed {
                    username: ticket.username,
                    error,
                }
            }
        };
        true
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn generation(&self) -> u64 {
        self.latest
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Loading { .. })
    }

    pub fn dataset(&self) -> Option<&Arc<CalendarDataset>> {
        match &self.phase {
            SessionPhase::Ready { dataset, .. } => Some(dataset),
            _ => None,
        }
    }

    pub fn stats(&self) -> Option<Stats> {
        match &self.phase {
            SessionPhase::Ready { stats, .. } => Some(*stats),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CalendarError> {
        match &self.phase {
            SessionPhase::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match &self.phase {
            SessionPhase::Idle => None,
            SessionPhase::Loading { username }
            | SessionPhase::Ready { username, .. }
            | SessionPhase::Failed { username, .. } => Some(username),
        }
    }
}
