//! HTTP middleware for request filtering and observability.

pub mod admission;
pub mod tracing;
