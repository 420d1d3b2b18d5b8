//! Handler for the URL shortening endpoint.

use axum::{
    Json,
    extract::{ConnectInfo, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use std::net::SocketAddr;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::log_event::LogEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::resolve_client_ip;

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /api`
///
/// # Request Flow
///
/// 1. Check the client's rate-limit budget (before even parsing the body)
/// 2. Validate the request body and URL
/// 3. Create the link, or return the existing one for an already-known URL
/// 4. Append the outcome to the insert log, whatever it was
///
/// Every attempt is logged with its response status. Under strict limits the
/// failed attempts count against the client's budget exactly like successful
/// ones, so a client spamming garbage gets throttled at the same rate as one
/// shortening real URLs.
///
/// # Responses
///
/// - **201 Created** with the new code
/// - **200 OK** with the existing code when the URL was already shortened
/// - **400 Bad Request** for empty/invalid bodies and unusable URLs
/// - **429 Too Many Requests** when a rate-limit window is exhausted
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let client_ip = resolve_client_ip(&headers, addr, state.behind_proxy);

    if let Err(err) = state.rate_limiter.check(&client_ip).await {
        state.log(LogEvent::insert("", err.status().as_u16(), &client_ip));
        return Err(err);
    }

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let err = AppError::bad_request(
                "The request body is empty or contains invalid JSON",
                json!({ "reason": rejection.body_text() }),
            );
            state.log(LogEvent::insert("", err.status().as_u16(), &client_ip));
            return Err(err);
        }
    };

    if let Err(e) = request.validate() {
        let err = AppError::bad_request(
            "The request does not contain a \"url\" property",
            json!({ "errors": e.to_string() }),
        );
        state.log(LogEvent::insert("", err.status().as_u16(), &client_ip));
        return Err(err);
    }

    match state.link_service.shorten(&request.url, &client_ip).await {
        Ok((link, created)) => {
            let status = if created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };

            state.log(LogEvent::insert(&link.code, status.as_u16(), &client_ip));

            let short_url = state.link_service.short_url(&link.code);
            tracing::info!(%client_ip, code = %link.code, created, %short_url, "shorten request served");

            Ok((
                status,
                Json(ShortenResponse {
                    code: link.code,
                    short_url,
                    created,
                }),
            ))
        }
        Err(err) => {
            state.log(LogEvent::insert("", err.status().as_u16(), &client_ip));
            Err(err)
        }
    }
}
