use crate::core::models::{
    ActiveScheduledMaintenances, AllIncidents, AllScheduledMaintenances, PageComponents,
    PageStatus, Summary, UnresolvedIncidents, UpcomingScheduledMaintenances,
};
use crate::statuspage::{FeedError, IncidentFeed};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the public statuspage.io v2 API of a single page.
pub struct StatuspageClient {
    base_url: String,
    http: reqwest::Client,
}

impl StatuspageClient {
    pub fn new(page_id: &str) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: format!("https://{}.statuspage.io/api/v2", page_id),
            http,
        })
    }

    /// Page status rollup with the blended indicator.
    pub async fn status(&self) -> Result<PageStatus, FeedError> {
        self.get_json("/status.json").await
    }

    /// Summary: status, components, unresolved incidents, maintenances.
    pub async fn summary(&self) -> Result<Summary, FeedError> {
        self.get_json("/summary.json").await
    }

    pub async fn components(&self) -> Result<PageComponents, FeedError> {
        self.get_json("/components.json").await
    }

    /// The 50 most recent incidents, including resolved ones.
    pub async fn all_incidents(&self) -> Result<AllIncidents, FeedError> {
        self.get_json("/incidents.json").await
    }

    /// Incidents still in investigating, identified or monitoring state.
    pub async fn unresolved_incidents(&self) -> Result<UnresolvedIncidents, FeedError> {
        self.get_json("/incidents/unresolved.json").await
    }

    pub async fn all_scheduled_maintenances(
        &self,
    ) -> Result<AllScheduledMaintenances, FeedError> {
        self.get_json("/scheduled-maintenances.json").await
    }

    pub async fn active_scheduled_maintenances(
        &self,
    ) -> Result<ActiveScheduledMaintenances, FeedError> {
        self.get_json("/scheduled-maintenances/active.json").await
    }

    pub async fn upcoming_scheduled_maintenances(
        &self,
    ) -> Result<UpcomingScheduledMaintenances, FeedError> {
        self.get_json("/scheduled-maintenances/upcoming.json").await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FeedError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl IncidentFeed for StatuspageClient {
    async fn all_incidents(&self) -> Result<AllIncidents, FeedError> {
        StatuspageClient::all_incidents(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_page_id() {
        let client = StatuspageClient::new("kctbh9vrtdwd").unwrap();
        assert_eq!(
            client.base_url,
            "https://kctbh9vrtdwd.statuspage.io/api/v2"
        );
    }
}
