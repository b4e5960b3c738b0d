//! Federation blocklist API server
//!
//! Keeps the list of remote domains this instance refuses to federate with
//! and answers blocklist lookups from an in-memory cache.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{extract::State, middleware, routing::get, Json, Router};
use sea_orm::Database;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::PostgresDomainBlockRepository;
use app::DomainBlockService;
use config::Config;
use domain::normalize::LocalDomains;
use domain::ports::DomainBlockRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub domain_block_service: Arc<DomainBlockService<dyn DomainBlockRepository>>,
    pub admin_token_hash: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    blocklist_cache: CacheStatus,
}

#[derive(Serialize)]
struct CacheStatus {
    populated: bool,
    domains: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.domain_block_service.cache();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        blocklist_cache: CacheStatus {
            populated: cache.is_populated().await,
            domains: cache.len().await,
        },
    })
}

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/domain_blocks",
            get(handlers::list_domain_blocks).post(handlers::create_domain_block),
        )
        .route(
            "/api/v1/admin/domain_blocks/:id",
            get(handlers::get_domain_block)
                .patch(handlers::update_domain_block)
                .delete(handlers::delete_domain_block),
        )
        .route(
            "/api/v1/admin/domain_blocks/domain/:domain",
            get(handlers::get_domain_block_by_domain),
        )
        .route(
            "/api/v1/domain_blocks/check",
            get(handlers::check_domain_block).post(handlers::check_domain_blocks),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public blocklist (no auth, obfuscated)
        .route(
            "/api/v1/instance/domain_blocks",
            get(handlers::list_public_domain_blocks),
        )
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fedblock_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting blocklist API...");

    // Load configuration
    let config = Config::from_env()?;
    let local = LocalDomains::new(&config.account_domain, &config.host)
        .context("HOST or ACCOUNT_DOMAIN is not a valid domain")?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let domain_block_repo = Arc::new(PostgresDomainBlockRepository::new(db));
    domain_block_repo
        .ensure_schema()
        .await
        .context("Failed to create domain_blocks table")?;
    let domain_block_repo: Arc<dyn DomainBlockRepository> = domain_block_repo;

    // Create application services
    let domain_block_service = Arc::new(DomainBlockService::new(domain_block_repo, local));
    tracing::info!(
        host = %domain_block_service.local_domains().host(),
        account_domain = %domain_block_service.local_domains().account_domain(),
        "Local domains are never blocked"
    );

    let state = AppState {
        domain_block_service,
        admin_token_hash: config.admin_token_hash.clone(),
    };

    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
