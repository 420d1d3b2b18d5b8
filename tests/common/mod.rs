#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ConnectInfo;
use tokio::sync::mpsc;

use shortnr::application::services::{
    AdmissionService, LinkService, ListSnapshot, RateLimitService, RateLimits, ScopeLevel,
    StatsService,
};
use shortnr::domain::log_event::LogEvent;
use shortnr::infrastructure::persistence::{MemEventLogRepository, MemLinkRepository};
use shortnr::state::AppState;
use shortnr::utils::code_generator::CodeGenerator;

/// The peer address every test request appears to come from.
pub const PEER_IP: &str = "127.0.0.1";

pub const BASE_URL: &str = "https://sho.rt/";
pub const CODE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
pub const CODE_LENGTH: usize = 5;

/// Knobs for building a test state; defaults keep everything permissive.
pub struct TestPolicy {
    pub limits: RateLimits,
    pub strict: bool,
    pub scope: ScopeLevel,
    pub whitelist_last: bool,
    pub whitelist: Option<HashSet<String>>,
    pub blacklist: Option<HashSet<String>>,
    pub behind_proxy: bool,
}

impl Default for TestPolicy {
    fn default() -> Self {
        Self {
            limits: RateLimits {
                per_minute: 0,
                per_hour: 0,
                per_day: 0,
            },
            strict: true,
            scope: ScopeLevel::Off,
            whitelist_last: true,
            whitelist: None,
            blacklist: None,
            behind_proxy: false,
        }
    }
}

/// The in-memory repositories behind a test state, for seeding and asserting.
pub struct TestBackend {
    pub links: Arc<MemLinkRepository>,
    pub events: Arc<MemEventLogRepository>,
}

pub fn ip_set(ips: &[&str]) -> HashSet<String> {
    ips.iter().map(|s| s.to_string()).collect()
}

/// Builds an [`AppState`] over in-memory repositories.
///
/// Log events are not drained by a worker; the returned receiver lets tests
/// assert exactly what would have been persisted. Rate-limit history is
/// seeded directly on the returned event repository instead.
pub fn create_test_state(
    policy: TestPolicy,
) -> (AppState, TestBackend, mpsc::Receiver<LogEvent>) {
    let links = Arc::new(MemLinkRepository::new());
    let events = Arc::new(MemEventLogRepository::new());
    let (log_tx, log_rx) = mpsc::channel(100);

    let generator = CodeGenerator::new(CODE_ALPHABET, CODE_LENGTH).unwrap();
    let lists = Arc::new(ListSnapshot::new(policy.whitelist, policy.blacklist));

    let state = AppState {
        admission: Arc::new(AdmissionService::new(
            policy.scope,
            policy.whitelist_last,
            lists,
        )),
        rate_limiter: Arc::new(RateLimitService::new(
            events.clone(),
            policy.limits,
            policy.strict,
        )),
        link_service: Arc::new(LinkService::new(
            links.clone(),
            generator,
            BASE_URL.to_string(),
            false,
        )),
        stats_service: Arc::new(StatsService::new(links.clone(), events.clone())),
        log_tx,
        behind_proxy: policy.behind_proxy,
    };

    (state, TestBackend { links, events }, log_rx)
}

/// Injects a fixed `ConnectInfo` peer address, standing in for the real
/// connection info the server provides in production.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = format!("{PEER_IP}:12345").parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
