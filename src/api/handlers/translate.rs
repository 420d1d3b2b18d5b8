//! Handler for translating a code back to its URL.

use axum::{
    Json,
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
};
use serde_json::json;
use std::net::SocketAddr;

use crate::api::dto::translate::TranslateResponse;
use crate::domain::log_event::LogEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::resolve_client_ip;

/// Returns the original URL behind a short code without redirecting.
///
/// # Endpoint
///
/// `GET /api/{code}`
///
/// Each translation is logged, successful or not.
pub async fn translate_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> Result<Json<TranslateResponse>, AppError> {
    let client_ip = resolve_client_ip(&headers, addr, state.behind_proxy);

    match state.link_service.resolve(&code).await? {
        Some(link) => {
            state.log(LogEvent::translate(&code, 200, &client_ip));

            Ok(Json(TranslateResponse {
                code: link.code,
                long_url: link.long_url,
            }))
        }
        None => {
            state.log(LogEvent::translate(&code, 404, &client_ip));

            Err(AppError::not_found(
                format!("The URL code \"{code}\" does not match any URL"),
                json!({ "code": code }),
            ))
        }
    }
}
