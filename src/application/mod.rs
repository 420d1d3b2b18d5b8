//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::admission_service::AdmissionService`] - Whitelist/blacklist admission control
//! - [`services::rate_limit_service::RateLimitService`] - Sliding-window rate limiting
//! - [`services::link_service::LinkService`] - Short link creation and resolution
//! - [`services::stats_service::StatsService`] - Service and per-link statistics

pub mod services;
