use anyhow::Context;

use taskboard_api::app::{build_app, services, AppServices};
use taskboard_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    taskboard_observability::init();

    let config = ApiConfig::from_env()?;
    let store = services::build_store(&config.storage).await?;
    let app = build_app(AppServices::new(store, config.seed.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err:?}");
        return;
    }
    tracing::info!("shutdown signal received");
}
