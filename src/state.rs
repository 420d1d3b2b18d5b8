use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AdmissionService, LinkService, RateLimitService, StatsService};
use crate::domain::log_event::LogEvent;

/// Shared application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub admission: Arc<AdmissionService>,
    pub rate_limiter: Arc<RateLimitService>,
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    pub log_tx: mpsc::Sender<LogEvent>,
    /// Trust proxy headers when resolving client IPs.
    pub behind_proxy: bool,
}

impl AppState {
    /// Enqueues an outcome log event, fire-and-forget.
    ///
    /// A full queue or a dead worker drops the event with a warning; the
    /// request outcome is never affected.
    pub fn log(&self, event: LogEvent) {
        if let Err(e) = self.log_tx.try_send(event) {
            tracing::warn!(error = %e, "failed to enqueue outcome log event");
        }
    }
}
