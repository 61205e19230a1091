mod auth;
mod config;
mod error;
mod handlers;
mod models;
mod router;
mod state;

use anyhow::Context;
use config::GatewayConfig;
use order_service::HttpIdentityProvider;
use router::create_router;
use state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::load()?;
    tracing::info!(addr = %config.bind_addr, "Starting Gateway API service");

    let provider = HttpIdentityProvider::new(config.identity.clone())
        .context("Failed to build identity provider client")?;
    let state = AppState::from_config(&config, Arc::new(provider))?;

    if config.lock_prune_secs > 0 {
        let engine = Arc::clone(&state.engine);
        let period = Duration::from_secs(config.lock_prune_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = engine.locks().prune_idle();
                if removed > 0 {
                    tracing::debug!(removed, remaining = engine.locks().len(), "Pruned idle user locks");
                }
            }
        });
    }

    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
