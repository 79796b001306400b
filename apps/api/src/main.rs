mod config;
mod errors;
mod export;
mod generation;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resignation API v{}", env!("CARGO_PKG_VERSION"));

    // No server-side key: each session supplies its own.
    let gemini = GeminiClient::new(config.gemini_api_url.clone());
    info!("Gemini client initialized (endpoint: {})", gemini.endpoint());

    let state = AppState::new(Arc::new(gemini));
    let _sweeper = state.sessions.spawn_sweeper(config.session_ttl);
    info!("Idle sessions expire after {}s", config.session_ttl.as_secs());
    info!(
        "Layout page config: {}x{}in {:?}, {}pt",
        state.page_config.paper_width_in,
        state.page_config.paper_height_in,
        state.page_config.orientation,
        state.page_config.font_size_pt
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
