//! Odyssey Engine - Backend API for TTRPG adventure outline generation
//!
//! The Engine is the backend server that:
//! - Turns an adventure concept into a high-level outline and a detailed
//!   scene-by-scene outline through schema-constrained generation
//! - Expands single scenes into step-by-step DM walkthroughs
//! - Serves deterministic demo content when no credential is configured or
//!   the provider quota is exhausted
//! - Exports results as JSON or Markdown

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odyssey_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Odyssey Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  OpenAI: {}", config.openai_base_url);
    tracing::info!("  Model: {}", config.openai_model);
    tracing::info!("  Demo fallback: {}", config.demo_fallback);
    if !config.has_credentials() {
        tracing::warn!("OPENAI_API_KEY is not set; generation will use demo content");
    }

    let port = config.server_port;
    let state = Arc::new(AppState::new(config));
    tracing::info!("Application state initialized");

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app);

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
