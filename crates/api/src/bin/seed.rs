//! Populate the configured store with demo data and exit.

use anyhow::Context;

use taskboard_api::app::services;
use taskboard_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    taskboard_observability::init();

    let config = ApiConfig::from_env()?;
    let store = services::build_store(&config.storage).await?;

    let report = taskboard_infra::seed(store.as_ref(), &config.seed)
        .await
        .context("seeding failed")?;

    tracing::info!(
        projects = report.projects,
        members = report.members,
        tasks = report.tasks,
        comments = report.comments,
        "seed complete"
    );
    Ok(())
}
