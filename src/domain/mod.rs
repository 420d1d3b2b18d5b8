//! Domain layer containing business entities and logic.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`log_event`] / [`log_worker`] - Asynchronous outcome logging
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Outcome Logging Flow
//!
//! 1. A handler finishes a request with some HTTP status
//! 2. A [`log_event::LogEvent`] is sent to a bounded channel (non-blocking)
//! 3. [`log_worker::run_log_worker`] persists it via [`repositories::EventLogRepository`]
//! 4. The rate limiter later reads the insert log back as attempt history

pub mod entities;
pub mod log_event;
pub mod log_worker;
pub mod repositories;
