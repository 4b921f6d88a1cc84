mod api_doc;
mod app;
mod config;
mod dispatcher;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod test_support;

use anyhow::Context;
use config::Config;
use dispatcher::Dispatcher;
use state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("items-service starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = store::from_config(&config).await?;
    let dispatcher = Dispatcher::new(store, config.resources());
    let app = app::build_router(AppState::new(dispatcher));

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    tracing::info!("items-service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
