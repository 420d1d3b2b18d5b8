//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, list loading, worker spawning, and the Axum
//! server lifecycle.

use crate::application::services::{
    AdmissionService, LinkService, ListSnapshot, RateLimitService, RateLimits, ScopeLevel,
    StatsService,
};
use crate::config::Config;
use crate::domain::log_worker::run_log_worker;
use crate::domain::repositories::{EventLogRepository, LinkRepository};
use crate::infrastructure::list_loader::load_optional_list;
use crate::infrastructure::persistence::{PgEventLogRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::CodeGenerator;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Whitelist/blacklist snapshot (failures fall open, see
///   [`crate::infrastructure::list_loader`])
/// - Background outcome-log worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let whitelist = load_optional_list(config.whitelist_path.as_deref(), "whitelist").await;
    let blacklist = load_optional_list(config.blacklist_path.as_deref(), "blacklist").await;
    let lists = Arc::new(ListSnapshot::new(whitelist, blacklist));

    let scope = ScopeLevel::try_from(config.list_scope)?;
    let generator = CodeGenerator::new(&config.code_alphabet, config.code_length)?;

    let pool = Arc::new(pool);
    let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let events: Arc<dyn EventLogRepository> = Arc::new(PgEventLogRepository::new(pool.clone()));

    let (log_tx, log_rx) = mpsc::channel(config.log_queue_capacity);
    tokio::spawn(run_log_worker(log_rx, events.clone()));
    tracing::info!("Outcome log worker started");

    let limits = RateLimits {
        per_minute: config.limit_per_minute,
        per_hour: config.limit_per_hour,
        per_day: config.limit_per_day,
    };

    let state = AppState {
        admission: Arc::new(AdmissionService::new(scope, config.whitelist_last, lists)),
        rate_limiter: Arc::new(RateLimitService::new(
            events.clone(),
            limits,
            config.strict_limits,
        )),
        link_service: Arc::new(LinkService::new(
            links.clone(),
            generator,
            config.base_url.clone(),
            config.allow_short_urls,
        )),
        stats_service: Arc::new(StatsService::new(links, events)),
        log_tx,
        behind_proxy: config.behind_proxy,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
