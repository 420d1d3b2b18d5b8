//! Repository implementations.
//!
//! PostgreSQL implementations back the real service; the in-memory ones back
//! integration tests that run without a database.
//!
//! - [`PgLinkRepository`] / [`MemLinkRepository`] - Link storage
//! - [`PgEventLogRepository`] / [`MemEventLogRepository`] - Outcome logs

pub mod mem_event_log_repository;
pub mod mem_link_repository;
pub mod pg_event_log_repository;
pub mod pg_link_repository;

pub use mem_event_log_repository::MemEventLogRepository;
pub use mem_link_repository::MemLinkRepository;
pub use pg_event_log_repository::PgEventLogRepository;
pub use pg_link_repository::PgLinkRepository;
