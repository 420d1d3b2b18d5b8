//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api`          - Shorten a URL
//! - `GET  /api/{code}`   - Translate a code
//! - `GET  /stats[/{code}]` - Statistics
//! - `GET  /{code}`       - Short link redirect
//!
//! # Middleware (outermost first)
//!
//! - **Path normalization** - Trailing slash handling (`POST /api/` works)
//! - **Tracing** - Structured request/response logging
//! - **Admission control** - Whitelist/blacklist filtering, scope-aware

use crate::api;
use crate::api::middleware::{admission, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = api::routes::routes()
        .layer(middleware::from_fn_with_state(state.clone(), admission::layer))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
