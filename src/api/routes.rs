//! API route configuration.

use crate::api::handlers::{
    code_stats_handler, redirect_handler, service_stats_handler, shorten_handler,
    translate_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes.
///
/// # Endpoints
///
/// - `POST /api`           - Shorten a URL (rate limited)
/// - `GET  /api/{code}`    - Translate a code to its URL
/// - `GET  /stats`         - Service-wide statistics
/// - `GET  /stats/{code}`  - Per-code statistics
/// - `GET  /{code}`        - Redirect to the original URL
///
/// Admission control is layered on top by [`crate::routes::app_router`], not
/// here, so tests can exercise handlers with or without filtering.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api", post(shorten_handler))
        .route("/api/{code}", get(translate_handler))
        .route("/stats", get(service_stats_handler))
        .route("/stats/{code}", get(code_stats_handler))
        .route("/{code}", get(redirect_handler))
}
