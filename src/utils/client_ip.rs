//! Client IP resolution from the connection or proxy headers.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Resolves the client address used as the identity for admission control,
/// rate limiting and event logging.
///
/// With `behind_proxy` set, `X-Real-IP` is consulted first, then the first
/// entry of `X-Forwarded-For`; the socket peer address is the fallback. These
/// headers are client-controlled, so they must only be trusted when a reverse
/// proxy in front of the service sets them.
pub fn resolve_client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
            let ip = ip.trim();
            if !ip.is_empty() {
                return ip.to_string();
            }
        }

        if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok())
            && let Some(first) = forwarded.split(',').next()
        {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    peer.ip().to_string()
}
