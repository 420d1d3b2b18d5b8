//! Background worker persisting outcome log events.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::log_event::LogEvent;
use crate::domain::repositories::EventLogRepository;

/// Drains the log event channel and appends each entry to its log.
///
/// Runs until every sender is dropped. A failed write is logged and the
/// event discarded; there is no retry, the logs are best-effort.
pub async fn run_log_worker(mut rx: mpsc::Receiver<LogEvent>, repository: Arc<dyn EventLogRepository>) {
    while let Some(event) = rx.recv().await {
        let result = match event {
            LogEvent::Visit(entry) => repository.log_visit(entry).await,
            LogEvent::Insert(entry) => repository.log_insert(entry).await,
            LogEvent::Translate(entry) => repository.log_translate(entry).await,
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist outcome log entry");
        }
    }
}
