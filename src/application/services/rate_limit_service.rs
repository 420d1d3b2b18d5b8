//! Sliding-window rate limiting over the insert-attempt log.
//!
//! No counters are maintained anywhere: every check fetches the client's raw
//! attempt timestamps for the trailing day and derives the per-window counts
//! on the spot. That costs one query per check and buys complete
//! statelessness - nothing to synchronize, nothing to expire.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::repositories::EventLogRepository;
use crate::error::AppError;

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

/// The time window a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Minute,
    Hour,
    Day,
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Window::Minute => f.write_str("minute"),
            Window::Hour => f.write_str("hour"),
            Window::Day => f.write_str("day"),
        }
    }
}

/// Per-window caps on shortening attempts. `0` disables a window.
#[derive(Debug, Clone, Copy)]
pub struct RateLimits {
    pub per_minute: u32,
    pub per_hour: u32,
    pub per_day: u32,
}

/// Counts of a client's attempts inside each sliding window, derived fresh
/// from one 24-hour event set per check and discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub day: usize,
    pub hour: usize,
    pub minute: usize,
}

impl HistoryWindow {
    /// Aggregates raw event timestamps into window counts.
    ///
    /// The input is already cut to the trailing 24 hours, so its size is the
    /// day count. Hour and minute counts are sub-divisions of the same set:
    /// an event 30 seconds old counts toward all three windows at once. The
    /// windows slide backward from `now`; they are not aligned clock buckets.
    pub fn from_events(now: DateTime<Utc>, events: &[DateTime<Utc>]) -> Self {
        let mut hour = 0;
        let mut minute = 0;

        for &event in events {
            let elapsed = (now - event).num_seconds();

            if elapsed <= SECONDS_PER_HOUR {
                hour += 1;
            }
            if elapsed <= SECONDS_PER_MINUTE {
                minute += 1;
            }
        }

        Self {
            day: events.len(),
            hour,
            minute,
        }
    }

    /// Returns the first violated window with its threshold, checking
    /// minute, then hour, then day. A threshold of 0 is never checked, and
    /// the first hit halts evaluation: a minute violation is reported even
    /// when the hour and day caps are blown as well.
    pub fn exceeded(&self, limits: &RateLimits) -> Option<(Window, u32)> {
        if limits.per_minute != 0 && self.minute >= limits.per_minute as usize {
            return Some((Window::Minute, limits.per_minute));
        }
        if limits.per_hour != 0 && self.hour >= limits.per_hour as usize {
            return Some((Window::Hour, limits.per_hour));
        }
        if limits.per_day != 0 && self.day >= limits.per_day as usize {
            return Some((Window::Day, limits.per_day));
        }
        None
    }
}

/// Rate limiting service for the shortening endpoint.
pub struct RateLimitService {
    events: Arc<dyn EventLogRepository>,
    limits: RateLimits,
    strict: bool,
}

impl RateLimitService {
    /// Creates the service.
    ///
    /// With `strict` set, every logged attempt counts toward the caps;
    /// otherwise the repository filters history down to successful attempts
    /// and failed ones are free.
    pub fn new(events: Arc<dyn EventLogRepository>, limits: RateLimits, strict: bool) -> Self {
        Self {
            events,
            limits,
            strict,
        }
    }

    /// Checks whether `client_ip` may make another shortening attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RateLimited`] naming the violated window and its
    /// threshold, or [`AppError::Internal`] if the history query fails.
    pub async fn check(&self, client_ip: &str) -> Result<(), AppError> {
        let events = self
            .events
            .recent_insert_attempts(client_ip, self.strict)
            .await?;

        let history = HistoryWindow::from_events(Utc::now(), &events);

        if let Some((window, threshold)) = history.exceeded(&self.limits) {
            tracing::warn!(
                client_ip,
                %window,
                threshold,
                "client reached its API request limit"
            );

            return Err(AppError::rate_limited(
                format!(
                    "Your IP address has reached or exceeded its limit of {threshold} shortening requests per {window}"
                ),
                json!({ "window": window.to_string(), "threshold": threshold }),
            ));
        }

        Ok(())
    }
}
