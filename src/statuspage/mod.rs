mod client;

use crate::core::models::AllIncidents;
use async_trait::async_trait;
use thiserror::Error;

pub use client::StatuspageClient;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response status {0}")]
    Status(reqwest::StatusCode),
}

/// The one operation the poller needs from a status feed.
///
/// `StatuspageClient` is the production implementation; tests substitute
/// a scripted feed.
#[async_trait]
pub trait IncidentFeed: Send + Sync {
    async fn all_incidents(&self) -> Result<AllIncidents, FeedError>;
}
