//! Handler for short URL redirects.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::Redirect,
};
use serde_json::json;
use std::net::SocketAddr;

use crate::domain::entities::NewVisitEntry;
use crate::domain::log_event::LogEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::resolve_client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Uses 307 Temporary Redirect so browsers re-request the short URL every
/// time and each visit lands in the log. Both hits and misses are logged,
/// with the response status telling them apart.
pub async fn redirect_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> Result<Redirect, AppError> {
    let client_ip = resolve_client_ip(&headers, addr, state.behind_proxy);

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let referer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let visit = |response: StatusCode| {
        LogEvent::Visit(NewVisitEntry {
            code: code.clone(),
            response: response.as_u16(),
            client_ip: client_ip.clone(),
            user_agent: user_agent.clone(),
            referer: referer.clone(),
        })
    };

    match state.link_service.resolve(&code).await? {
        Some(link) => {
            state.log(visit(StatusCode::TEMPORARY_REDIRECT));
            tracing::info!(%client_ip, %code, url = %link.long_url, "redirected");

            Ok(Redirect::temporary(&link.long_url))
        }
        None => {
            state.log(visit(StatusCode::NOT_FOUND));

            Err(AppError::not_found(
                "This URL does not redirect to anything",
                json!({ "code": code }),
            ))
        }
    }
}
