//! Admission control middleware.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use std::net::SocketAddr;

use crate::application::services::Decision;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::resolve_client_ip;

/// Filters requests through the whitelist/blacklist before they reach any
/// handler.
///
/// Applied to the whole router; the configured scope level decides per
/// request whether the lists are consulted at all, so out-of-scope requests
/// pass through at the cost of one pure function call.
///
/// # Errors
///
/// Returns `403 Forbidden` when the lists deny the client. The message names
/// what was denied: "the API" for API-level scopes, "this service" when the
/// whole service is protected.
pub async fn layer(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client_ip = resolve_client_ip(req.headers(), addr, state.behind_proxy);

    match state
        .admission
        .admit(&client_ip, req.uri().path(), req.method())
    {
        Decision::Allow => Ok(next.run(req).await),
        Decision::Deny(scope) => {
            tracing::warn!(
                %client_ip,
                path = %req.uri().path(),
                "client tried to access {scope} and was denied"
            );

            Err(AppError::forbidden(
                format!("You do not have permission to query {scope}."),
                json!({ "scope": scope.to_string() }),
            ))
        }
    }
}
