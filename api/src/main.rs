//! podcastit API Server
//!
//! Turns arbitrary audio URLs into a podcast feed. Submitting a URL appends it
//! to a per-feed log; fetching a feed renders that log as Atom or RSS.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::FileEntryStore;
use app::{FeedService, FeedSettings};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<FeedService<FileEntryStore>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(FileEntryStore::new(config.feed_dir.clone()));
        let feed_service = Arc::new(FeedService::new(store, FeedSettings::from(&config)));

        Self {
            feed_service,
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Routes and middleware shared by the server and the HTTP tests
pub fn app_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Submit-or-render, query string (GET) or form body (POST)
        .route("/", get(handlers::podcastit).post(handlers::podcastit))
        // Canonical feed location
        .route("/feeds/:feedname", get(handlers::get_feed))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,podcastit_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting podcastit API...");

    // Load configuration
    let config = Config::from_env()?;

    tokio::fs::create_dir_all(&config.feed_dir)
        .await
        .with_context(|| format!("Failed to create feed directory {:?}", config.feed_dir))?;
    tracing::info!(feed_dir = ?config.feed_dir, default_feed = %config.default_feed, "Feed storage ready");

    // Rate limiting config: sustained rate and burst per client IP
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish()
            .context("Failed to build governor config")?,
    );

    let port = config.port;
    let app = app_router(AppState::new(config)).layer(GovernorLayer {
        config: governor_config,
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
