pub mod cli;
pub mod core;
pub mod daemon;
pub mod poller;
pub mod statuspage;

pub use crate::core::history::{BoundedHistory, HistoryError};
pub use crate::core::models::{AllIncidents, Incident, IncidentUpdate};
pub use crate::poller::{PollerConfig, PollerError, PollerEvent, UpdatePoller};
pub use crate::statuspage::{FeedError, IncidentFeed, StatuspageClient};
