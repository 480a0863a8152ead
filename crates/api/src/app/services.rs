//! Store construction and the state shared by all handlers.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use taskboard_infra::{InMemoryStore, PostgresStore, SeedOptions, SharedStore};

use crate::config::StorageConfig;

/// Everything a handler needs, injected via `Extension<Arc<AppServices>>`.
#[derive(Clone)]
pub struct AppServices {
    pub store: SharedStore,
    pub seed_options: SeedOptions,
}

impl AppServices {
    pub fn new(store: SharedStore, seed_options: SeedOptions) -> Self {
        Self {
            store,
            seed_options,
        }
    }

    /// Fresh in-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), SeedOptions::default())
    }
}

pub async fn build_store(storage: &StorageConfig) -> anyhow::Result<SharedStore> {
    match storage {
        StorageConfig::InMemory => {
            tracing::warn!("USE_PERSISTENT_STORES not enabled; data lives in memory only");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StorageConfig::Postgres {
            url,
            max_connections,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(url)
                .await
                .context("failed to connect to Postgres")?;

            let store = PostgresStore::new(pool);
            store
                .ensure_schema()
                .await
                .context("failed to create database schema")?;

            tracing::info!(max_connections, "connected to Postgres");
            Ok(Arc::new(store))
        }
    }
}
