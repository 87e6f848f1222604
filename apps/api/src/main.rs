mod config;
mod db;
mod errors;
mod models;
mod payments;
mod routes;
mod state;
mod subscriptions;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::payments::StripeClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Subscriptions API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite (schema applied on open)
    let db = create_pool(&config.database_url).await?;

    // Initialize payment provider
    let stripe = StripeClient::new(config.stripe_secret_key.clone(), &config.stripe_api_base)?;
    info!("Stripe client initialized ({})", config.stripe_api_base);

    let state = AppState {
        db,
        payments: Arc::new(stripe),
    };

    info!("Serving dashboard from {}", config.static_dir);
    let app = build_router(state, &config.static_dir)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
