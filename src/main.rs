//! Heatwave server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heatwave::api::{create_router_with_cors, AppState};
use heatwave::config::{AppConfig, LogFormat};
use heatwave::dataset::Dataset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    config.validate().context("invalid configuration")?;

    let load_options = config.dataset.to_load_options()?;
    let limits = config.query.to_limits()?;

    tracing::info!(sources = load_options.sources.len(), "Loading dataset");
    let dataset = Dataset::load(&load_options).context("failed to load dataset")?;

    let state = AppState::with_dataset(Arc::new(dataset), limits);
    let router = create_router_with_cors(state, config.cors.enabled);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, cors = config.cors.enabled, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("heatwave=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
