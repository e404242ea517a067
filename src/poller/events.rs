use crate::core::models::Incident;
use crate::statuspage::FeedError;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Events emitted by [`UpdatePoller`](crate::poller::UpdatePoller).
///
/// Delivered over a broadcast channel, so any number of subscribers can
/// listen. Lifecycle events carry the instant they were emitted.
#[derive(Debug, Clone)]
pub enum PollerEvent {
    /// The poller transitioned from idle to running.
    Started { at: DateTime<Utc> },
    /// A fetch-compare cycle completed, whether or not it found an update.
    Ran { at: DateTime<Utc> },
    /// The poller transitioned from running to idle.
    Stopped { at: DateTime<Utc> },
    /// A not-yet-seen incident update was detected. Carries the incident
    /// with its latest update at the front of `incident_updates`.
    IncidentUpdate(Box<Incident>),
    /// A cycle's fetch failed. State is unchanged and polling continues.
    FetchError(Arc<FeedError>),
}
