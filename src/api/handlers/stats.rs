//! Handlers for the statistics endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::stats::{CodeStatsResponse, ServiceStatsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns service-wide statistics.
///
/// # Endpoint
///
/// `GET /stats`
pub async fn service_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<ServiceStatsResponse>, AppError> {
    let stats = state.stats_service.service_stats().await?;

    Ok(Json(ServiceStatsResponse {
        urls: stats.urls,
        visits: stats.visits,
    }))
}

/// Returns statistics for one short code.
///
/// # Endpoint
///
/// `GET /stats/{code}`
pub async fn code_stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CodeStatsResponse>, AppError> {
    let stats = state.stats_service.code_stats(&code).await?.ok_or_else(|| {
        AppError::not_found(
            "There is no URL associated with this code",
            json!({ "code": code }),
        )
    })?;

    Ok(Json(CodeStatsResponse {
        created: stats.created,
        visits: stats.visits,
    }))
}
