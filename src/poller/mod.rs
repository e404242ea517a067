mod events;

use crate::core::history::{BoundedHistory, HistoryError};
use crate::core::models::{AllIncidents, Incident, IncidentUpdate};
use crate::statuspage::IncidentFeed;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, watch, RwLock};
use tokio::task::JoinHandle;

pub use events::PollerEvent;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollerError {
    #[error("poll interval must be greater than zero")]
    InvalidInterval,
    #[error(transparent)]
    History(#[from] HistoryError),
}

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
    pub history_capacity: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(30_000),
            history_capacity: 50,
        }
    }
}

struct PollerState {
    prev: Option<AllIncidents>,
    curr: Option<AllIncidents>,
    emitted: BoundedHistory<IncidentUpdate>,
}

struct TimerHandle {
    shutdown: watch::Sender<bool>,
    _task: JoinHandle<()>,
}

/// Polls an incident feed and emits each distinct incident update once.
///
/// The feed sometimes re-reports the same update across polls, and its
/// ordering is not contractually guaranteed, so detection requires all
/// three of: a different update id than the previous cycle's latest, an
/// id not already in the emitted history, and a strictly newer timestamp.
/// Comparing against the previous cycle alone is not enough: after the
/// sequence A, B, A-again, the second A differs from B but must stay
/// suppressed, which is what the bounded history is for.
///
/// Only the newest update of the newest incident is compared. Updates to
/// older incidents, or to incidents beyond the first in the listing, are
/// not detected.
pub struct UpdatePoller {
    feed: Arc<dyn IncidentFeed>,
    interval: Duration,
    state: Arc<RwLock<PollerState>>,
    events: broadcast::Sender<PollerEvent>,
    timer: Option<TimerHandle>,
}

impl UpdatePoller {
    pub fn new(feed: Arc<dyn IncidentFeed>, config: PollerConfig) -> Result<Self, PollerError> {
        if config.interval.is_zero() {
            return Err(PollerError::InvalidInterval);
        }

        let emitted = BoundedHistory::new(config.history_capacity)?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            feed,
            interval: config.interval,
            state: Arc::new(RwLock::new(PollerState {
                prev: None,
                curr: None,
                emitted,
            })),
            events,
            timer: None,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PollerEvent> {
        self.events.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start polling. Emits `Started`, runs one cycle before returning,
    /// then keeps cycling on the configured interval until [`stop`].
    ///
    /// No-op while already running.
    ///
    /// [`stop`]: UpdatePoller::stop
    pub async fn start(&mut self) {
        if self.timer.is_some() {
            tracing::debug!("Poller already running, ignoring start");
            return;
        }

        let _ = self.events.send(PollerEvent::Started { at: Utc::now() });

        run_cycle(&self.feed, &self.state, &self.events).await;

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let feed = Arc::clone(&self.feed);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let interval = self.interval;

        // The sleep is re-armed only after a cycle completes, so cycles
        // never overlap even when a fetch outlasts the interval.
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        run_cycle(&feed, &state, &events).await;
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        self.timer = Some(TimerHandle {
            shutdown: shutdown_tx,
            _task: task,
        });

        tracing::info!(interval = ?self.interval, "Poller started");
    }

    /// Stop polling and emit `Stopped`. Returns false (and emits nothing)
    /// when the poller is not running.
    ///
    /// An in-flight cycle is not cancelled: its state changes still apply
    /// and its events still fire once it finishes.
    pub fn stop(&mut self) -> bool {
        let Some(timer) = self.timer.take() else {
            return false;
        };

        let _ = timer.shutdown.send(true);
        let _ = self.events.send(PollerEvent::Stopped { at: Utc::now() });

        tracing::info!("Poller stopped");
        true
    }

    /// Run a single fetch-compare cycle outside the timer.
    pub async fn run_once(&self) {
        run_cycle(&self.feed, &self.state, &self.events).await;
    }

    pub async fn current(&self) -> Option<AllIncidents> {
        self.state.read().await.curr.clone()
    }

    pub async fn previous(&self) -> Option<AllIncidents> {
        self.state.read().await.prev.clone()
    }

    /// Updates emitted so far, oldest first, bounded by the history capacity.
    pub async fn emitted_updates(&self) -> Vec<IncidentUpdate> {
        self.state.read().await.emitted.to_vec()
    }
}

async fn run_cycle(
    feed: &Arc<dyn IncidentFeed>,
    state: &Arc<RwLock<PollerState>>,
    events: &broadcast::Sender<PollerEvent>,
) {
    let fetched = match feed.all_incidents().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            // abort before the shift so prev/curr survive the failed cycle
            tracing::warn!(error = %e, "Incident fetch failed");
            let _ = events.send(PollerEvent::FetchError(Arc::new(e)));
            return;
        }
    };

    let mut state = state.write().await;
    state.prev = state.curr.take();
    state.curr = Some(fetched);

    let _ = events.send(PollerEvent::Ran { at: Utc::now() });

    if let Some(incident) = detect_new_update(&mut state) {
        tracing::info!(
            incident_id = %incident.id,
            incident = %incident.name,
            "New incident update detected"
        );
        let _ = events.send(PollerEvent::IncidentUpdate(Box::new(incident)));
    }
}

/// The triple condition: a different id than the previous cycle's latest,
/// not already emitted, and strictly newer. Anything incomplete (missing
/// snapshots, empty listings, blank ids, absent timestamps) is "nothing
/// to report" rather than an error.
fn detect_new_update(state: &mut PollerState) -> Option<Incident> {
    let curr = state.curr.as_ref()?;
    let prev = state.prev.as_ref()?;

    let recent_incident = curr.incidents.first()?;
    prev.incidents.first()?;

    let recent = recent_incident.latest_update()?;
    let previous = prev.latest_update()?;

    if recent.id.is_empty() || previous.id.is_empty() {
        return None;
    }

    let recent_at = recent.updated_at?;
    let previous_at = previous.updated_at?;

    let is_new = recent.id != previous.id
        && !state.emitted.contains(|seen| seen.id == recent.id)
        && recent_at > previous_at;

    if !is_new {
        return None;
    }

    let update = recent.clone();
    let incident = recent_incident.clone();
    state.emitted.insert(update);

    Some(incident)
}
