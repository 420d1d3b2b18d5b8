//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage with uniqueness-aware inserts
//! - [`EventLogRepository`] - Outcome logs and rate-limit history

pub mod event_log_repository;
pub mod link_repository;

pub use event_log_repository::EventLogRepository;
pub use link_repository::{InsertOutcome, LinkRepository};

#[cfg(test)]
pub use event_log_repository::MockEventLogRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
