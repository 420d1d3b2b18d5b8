mod common;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use axum_test::TestServer;
use serde_json::json;

use common::{MockConnectInfoLayer, TestPolicy, ip_set};
use shortnr::api::handlers::{redirect_handler, service_stats_handler, shorten_handler};
use shortnr::api::middleware::admission;
use shortnr::application::services::ScopeLevel;
use shortnr::domain::repositories::LinkRepository;
use shortnr::state::AppState;

fn filtered_app(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api", post(shorten_handler))
        .route("/stats", get(service_stats_handler))
        .route("/{code}", get(redirect_handler))
        .layer(middleware::from_fn_with_state(state.clone(), admission::layer))
        .layer(MockConnectInfoLayer)
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_blacklisted_client_is_denied_on_api_posts() {
    let (state, _backend, _log_rx) = common::create_test_state(TestPolicy {
        scope: ScopeLevel::ApiPostOnly,
        blacklist: Some(ip_set(&[common::PEER_IP])),
        ..TestPolicy::default()
    });
    let server = filtered_app(state);

    let response = server
        .post("/api")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_forbidden();

    let body = response.json::<serde_json::Value>();
    assert_eq!(
        body["error"]["message"],
        "You do not have permission to query the API."
    );
}

#[tokio::test]
async fn test_blacklisted_client_still_gets_redirects_at_api_scope() {
    // Redirects are outside ApiPostOnly scope, so the lists never run.
    let (state, backend, _log_rx) = common::create_test_state(TestPolicy {
        scope: ScopeLevel::ApiPostOnly,
        blacklist: Some(ip_set(&[common::PEER_IP])),
        ..TestPolicy::default()
    });

    backend
        .links
        .insert(shortnr::domain::entities::NewLink {
            code: "abc12".to_string(),
            long_url: "https://example.com/some/long/path".to_string(),
            client_ip: "198.51.100.9".to_string(),
        })
        .await
        .unwrap();

    let server = filtered_app(state);

    let response = server.get("/abc12").await;

    response.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "https://example.com/some/long/path"
    );
}

#[tokio::test]
async fn test_full_scope_denial_names_the_service() {
    let (state, _backend, _log_rx) = common::create_test_state(TestPolicy {
        scope: ScopeLevel::All,
        blacklist: Some(ip_set(&[common::PEER_IP])),
        ..TestPolicy::default()
    });
    let server = filtered_app(state);

    let response = server.get("/abc12").await;

    response.assert_status_forbidden();

    let body = response.json::<serde_json::Value>();
    assert_eq!(
        body["error"]["message"],
        "You do not have permission to query this service."
    );
}

#[tokio::test]
async fn test_scope_off_admits_blacklisted_clients() {
    let (state, _backend, _log_rx) = common::create_test_state(TestPolicy {
        scope: ScopeLevel::Off,
        blacklist: Some(ip_set(&[common::PEER_IP])),
        ..TestPolicy::default()
    });
    let server = filtered_app(state);

    let response = server
        .post("/api")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
}

#[tokio::test]
async fn test_whitelist_only_gates_unlisted_clients() {
    let (state, _backend, _log_rx) = common::create_test_state(TestPolicy {
        scope: ScopeLevel::ApiPostOnly,
        whitelist: Some(ip_set(&["203.0.113.7"])),
        ..TestPolicy::default()
    });
    let server = filtered_app(state);

    let response = server
        .post("/api")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_forbidden();
}

#[tokio::test]
async fn test_client_on_both_lists_passes_when_whitelist_wins() {
    let (state, _backend, _log_rx) = common::create_test_state(TestPolicy {
        scope: ScopeLevel::ApiPostOnly,
        whitelist: Some(ip_set(&[common::PEER_IP])),
        blacklist: Some(ip_set(&[common::PEER_IP])),
        whitelist_last: true,
        ..TestPolicy::default()
    });
    let server = filtered_app(state);

    let response = server
        .post("/api")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
}

#[tokio::test]
async fn test_client_on_both_lists_denied_when_blacklist_wins() {
    let (state, _backend, _log_rx) = common::create_test_state(TestPolicy {
        scope: ScopeLevel::ApiPostOnly,
        whitelist: Some(ip_set(&[common::PEER_IP])),
        blacklist: Some(ip_set(&[common::PEER_IP])),
        whitelist_last: false,
        ..TestPolicy::default()
    });
    let server = filtered_app(state);

    let response = server
        .post("/api")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_forbidden();
}

#[tokio::test]
async fn test_api_and_stats_scope_covers_stats() {
    let (state, _backend, _log_rx) = common::create_test_state(TestPolicy {
        scope: ScopeLevel::ApiAndStats,
        blacklist: Some(ip_set(&[common::PEER_IP])),
        ..TestPolicy::default()
    });
    let server = filtered_app(state);

    let response = server.get("/stats").await;

    response.assert_status_forbidden();
}
