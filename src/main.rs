//! API Gateway - Main Application Entry Point
//!
//! This is an HTTP API gateway that fronts a set of demo endpoints with a
//! shared API-key and rate-limiting gate. Every protected request passes
//! authentication and rate-limit admission before any business handler runs;
//! key issuance is a separate unauthenticated flow.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Authentication**: opaque API keys derived via SHA-256, in-memory store
//! - **Rate Limiting**: fixed windows per caller address, global + per-route rules
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build in-memory key store (seeded with the demo key) and limiter
//! 3. Build HTTP router with the middleware chain
//! 4. Start server on configured port

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::models::rate_limit::{RateRule, RouteRules};
use crate::services::key_store::InMemoryKeyStore;
use crate::services::rate_limiter::FixedWindowLimiter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Declarative route-to-rules mapping: global defaults apply everywhere,
    // per-route rules stack on top of them.
    let route_rules = RouteRules::new(vec![
        RateRule::per_hour(config.rate_limit_per_hour),
        RateRule::per_day(config.rate_limit_per_day),
    ])
    .route("/api/v1/weather", vec![RateRule::per_hour(50)])
    .route("/api/v1/currency", vec![RateRule::per_hour(50)])
    .route("/api/v1/quote", vec![RateRule::per_hour(100)])
    .route("/api/v1/shorten", vec![RateRule::per_hour(30)])
    .route("/api/v1/ai/text-generate", vec![RateRule::per_minute(30)]);

    let state = AppState {
        keys: Arc::new(InMemoryKeyStore::with_demo_keys()),
        limiter: Arc::new(FixedWindowLimiter::new()),
        route_rules: Arc::new(route_rules),
        secret_key: config.secret_key.clone(),
    };
    tracing::info!("Key store seeded with demo credentials");

    // Protected routes pass the full gate: authentication, then rate
    // limiting. Layers run outermost-first, so the auth layer is added last.
    let protected_routes = Router::new()
        .route("/api/v1/weather", get(handlers::weather::weather))
        .route("/api/v1/currency", get(handlers::currency::convert))
        .route("/api/v1/quote", get(handlers::quote::random_quote))
        .route("/api/v1/shorten", post(handlers::shorten::shorten_url))
        .route("/api/v1/ai/text-generate", get(handlers::ai::text_generate))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit_middleware,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    // Issuance is unauthenticated but still rate limited, so key generation
    // cannot be hammered from one address.
    let issuance_routes = Router::new()
        .route("/generate-key", post(handlers::keys::generate_key))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit_middleware,
        ));

    let app = Router::new()
        // Public routes (no gate)
        .route("/health", get(handlers::health::health_check))
        .merge(protected_routes)
        .merge(issuance_routes)
        .fallback(handlers::not_found)
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Serve with connect info so the rate limiter can key quota buckets by
    // the caller's network address.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
