//! Outcome log event for asynchronous persistence.

use crate::domain::entities::{NewInsertEntry, NewTranslateEntry, NewVisitEntry};

/// An outcome to be appended to one of the logs.
///
/// Handlers construct these and push them into a bounded channel; the
/// background worker ([`crate::domain::log_worker::run_log_worker`]) drains
/// the channel and persists each entry. This keeps log writes off the
/// request path: a redirect is served at full speed even when the log
/// insert is slow.
///
/// If the queue is full the event is dropped with a warning. For the rate
/// limiter this means an attempt can occasionally go uncounted under
/// overload, which errs on the permissive side.
#[derive(Debug, Clone)]
pub enum LogEvent {
    Visit(NewVisitEntry),
    Insert(NewInsertEntry),
    Translate(NewTranslateEntry),
}

impl LogEvent {
    /// Shorthand for an insert-attempt event.
    pub fn insert(code: impl Into<String>, response: u16, client_ip: impl Into<String>) -> Self {
        Self::Insert(NewInsertEntry {
            code: code.into(),
            response,
            client_ip: client_ip.into(),
        })
    }

    /// Shorthand for a translation event.
    pub fn translate(code: impl Into<String>, response: u16, client_ip: impl Into<String>) -> Self {
        Self::Translate(NewTranslateEntry {
            code: code.into(),
            response,
            client_ip: client_ip.into(),
        })
    }
}
