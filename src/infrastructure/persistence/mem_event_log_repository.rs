//! In-memory outcome log repository for DB-free tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

use crate::domain::entities::{NewInsertEntry, NewTranslateEntry, NewVisitEntry};
use crate::domain::repositories::EventLogRepository;
use crate::error::AppError;

/// The three logs as timestamped vectors behind mutexes.
#[derive(Default)]
pub struct MemEventLogRepository {
    visits: Mutex<Vec<(NewVisitEntry, DateTime<Utc>)>>,
    inserts: Mutex<Vec<(NewInsertEntry, DateTime<Utc>)>>,
    translates: Mutex<Vec<(NewTranslateEntry, DateTime<Utc>)>>,
}

impl MemEventLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an insert attempt with an explicit timestamp.
    ///
    /// Lets tests backdate history instead of sleeping through rate-limit
    /// windows.
    pub fn record_insert_at(&self, entry: NewInsertEntry, at: DateTime<Utc>) {
        self.inserts.lock().unwrap().push((entry, at));
    }
}

#[async_trait]
impl EventLogRepository for MemEventLogRepository {
    async fn recent_insert_attempts(
        &self,
        client_ip: &str,
        strict: bool,
    ) -> Result<Vec<DateTime<Utc>>, AppError> {
        let cutoff = Utc::now() - Duration::hours(24);
        let inserts = self.inserts.lock().unwrap();

        Ok(inserts
            .iter()
            .filter(|(entry, at)| {
                entry.client_ip == client_ip
                    && *at > cutoff
                    && (strict || entry.response == 200 || entry.response == 201)
            })
            .map(|(_, at)| *at)
            .collect())
    }

    async fn log_visit(&self, entry: NewVisitEntry) -> Result<(), AppError> {
        self.visits.lock().unwrap().push((entry, Utc::now()));
        Ok(())
    }

    async fn log_insert(&self, entry: NewInsertEntry) -> Result<(), AppError> {
        self.inserts.lock().unwrap().push((entry, Utc::now()));
        Ok(())
    }

    async fn log_translate(&self, entry: NewTranslateEntry) -> Result<(), AppError> {
        self.translates.lock().unwrap().push((entry, Utc::now()));
        Ok(())
    }

    async fn total_visits(&self) -> Result<i64, AppError> {
        let visits = self.visits.lock().unwrap();
        Ok(visits.iter().filter(|(e, _)| e.response < 400).count() as i64)
    }

    async fn visits_for_code(&self, code: &str) -> Result<i64, AppError> {
        let visits = self.visits.lock().unwrap();
        Ok(visits
            .iter()
            .filter(|(e, _)| e.response < 400 && e.code == code)
            .count() as i64)
    }
}
