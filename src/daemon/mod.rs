use crate::core::notifications::send_incident_notification;
use crate::core::settings::Settings;
use crate::poller::{PollerConfig, PollerEvent, UpdatePoller};
use crate::statuspage::StatuspageClient;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

/// Watch a status page until ctrl-c, logging every incident update and
/// optionally raising a desktop notification for each one.
pub async fn run(page_id: &str, settings: &Settings, notify: bool) -> Result<()> {
    let client =
        StatuspageClient::new(page_id).context("Failed to build statuspage client")?;

    let status = client
        .status()
        .await
        .with_context(|| format!("Failed to reach status page '{}'", page_id))?;

    let page_name = status.page.name.clone();
    tracing::info!(
        page = %page_name,
        indicator = status.status.indicator.label(),
        description = %status.status.description,
        "Watching status page"
    );

    let mut poller = UpdatePoller::new(
        Arc::new(client),
        PollerConfig {
            interval: Duration::from_millis(settings.poller.interval_ms),
            history_capacity: settings.poller.history_capacity,
        },
    )?;

    let mut events = poller.subscribe();
    poller.start().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received ctrl-c, stopping");
                poller.stop();
                break;
            }
            event = events.recv() => match event {
                Ok(PollerEvent::IncidentUpdate(incident)) => {
                    tracing::info!(
                        incident = %incident.name,
                        status = incident.status.as_str(),
                        shortlink = %incident.shortlink,
                        "Incident update"
                    );

                    if notify {
                        if let Err(e) = send_incident_notification(&page_name, &incident) {
                            tracing::warn!(error = %e, "Failed to send desktop notification");
                        }
                    }
                }
                Ok(PollerEvent::FetchError(e)) => {
                    tracing::warn!(error = %e, "Fetch failed, will retry next cycle");
                }
                Ok(PollerEvent::Ran { .. }) => {
                    tracing::debug!("Checked for updates");
                }
                Ok(PollerEvent::Started { at }) => {
                    tracing::debug!(%at, "Polling started");
                }
                Ok(PollerEvent::Stopped { .. }) => break,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event stream lagged, continuing");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    Ok(())
}
