mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ApiFlavor, Config};
use crate::llm_client::{ChatProvider, CohereClient, CohereLegacyClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Biograph API v{}", env!("CARGO_PKG_VERSION"));

    // Select the chat adapter
    let chat: Arc<dyn ChatProvider> = match config.api_flavor {
        ApiFlavor::V2 => Arc::new(CohereClient::new(config.cohere_api_key.clone())),
        ApiFlavor::Legacy => Arc::new(CohereLegacyClient::new(config.cohere_api_key.clone())),
    };
    info!("Chat adapter initialized ({:?})", config.api_flavor);

    // Cancelled on ctrl-c so in-flight upstream calls abort with the server
    let shutdown = CancellationToken::new();

    let state = AppState {
        chat,
        config: config.clone(),
        shutdown: shutdown.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
