mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;

use common::TestPolicy;
use shortnr::api::handlers::{code_stats_handler, service_stats_handler};
use shortnr::domain::entities::{NewLink, NewVisitEntry};
use shortnr::domain::repositories::{EventLogRepository, LinkRepository};
use shortnr::state::AppState;

fn stats_app(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/stats", get(service_stats_handler))
        .route("/stats/{code}", get(code_stats_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn visit(code: &str, response: u16) -> NewVisitEntry {
    NewVisitEntry {
        code: code.to_string(),
        response,
        client_ip: "203.0.113.7".to_string(),
        user_agent: None,
        referer: None,
    }
}

#[tokio::test]
async fn test_service_stats_counts_links_and_successful_visits() {
    let (state, backend, _log_rx) = common::create_test_state(TestPolicy::default());

    for (code, url) in [
        ("abc12", "https://example.com/some/long/path"),
        ("xyz89", "https://example.com/another/long/path"),
    ] {
        backend
            .links
            .insert(NewLink {
                code: code.to_string(),
                long_url: url.to_string(),
                client_ip: "203.0.113.7".to_string(),
            })
            .await
            .unwrap();
    }

    backend.events.log_visit(visit("abc12", 307)).await.unwrap();
    backend.events.log_visit(visit("abc12", 307)).await.unwrap();
    // A failed visit does not count
    backend.events.log_visit(visit("zzzz9", 404)).await.unwrap();

    let server = stats_app(state);

    let response = server.get("/stats").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["urls"], 2);
    assert_eq!(body["visits"], 2);
}

#[tokio::test]
async fn test_code_stats_reports_creation_and_visits() {
    let (state, backend, _log_rx) = common::create_test_state(TestPolicy::default());

    backend
        .links
        .insert(NewLink {
            code: "abc12".to_string(),
            long_url: "https://example.com/some/long/path".to_string(),
            client_ip: "203.0.113.7".to_string(),
        })
        .await
        .unwrap();

    backend.events.log_visit(visit("abc12", 307)).await.unwrap();

    let server = stats_app(state);

    let response = server.get("/stats/abc12").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["visits"], 1);
    assert!(body["created"].is_string());
}

#[tokio::test]
async fn test_code_stats_unknown_code() {
    let (state, _backend, _log_rx) = common::create_test_state(TestPolicy::default());
    let server = stats_app(state);

    server.get("/stats/zzzz9").await.assert_status_not_found();
}
