//! Business logic services for the application layer.

pub mod admission_service;
pub mod link_service;
pub mod rate_limit_service;
pub mod stats_service;

pub use admission_service::{AdmissionService, Decision, DeniedScope, ListSnapshot, ScopeLevel};
pub use link_service::LinkService;
pub use rate_limit_service::{RateLimitService, RateLimits, Window};
pub use stats_service::{CodeStats, ServiceStats, StatsService};
