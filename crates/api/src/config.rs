//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;

use anyhow::{bail, Context};
use taskboard_infra::seed::{SeedOptions, DEFAULT_RECORD_COUNT};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Which persistence backend to wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    InMemory,
    Postgres { url: String, max_connections: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageConfig,
    pub seed: SeedOptions,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8080")?;

        let use_persistent = lookup("USE_PERSISTENT_STORES")
            .map(|v| v.trim().parse::<bool>())
            .transpose()
            .context("USE_PERSISTENT_STORES must be true or false")?
            .unwrap_or(false);

        let storage = if use_persistent {
            let Some(url) = lookup("DATABASE_URL") else {
                bail!("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");
            };
            let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
                .map(|v| v.trim().parse::<u32>())
                .transpose()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS);
            StorageConfig::Postgres { url, max_connections }
        } else {
            StorageConfig::InMemory
        };

        let record_count = lookup("SEED_RECORD_COUNT")
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .context("SEED_RECORD_COUNT must be a non-negative integer")?
            .unwrap_or(DEFAULT_RECORD_COUNT);
        let rng_seed = lookup("SEED_RNG_SEED")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .context("SEED_RNG_SEED must be an unsigned integer")?;

        Ok(Self {
            bind_addr,
            storage,
            seed: SeedOptions {
                record_count,
                rng_seed,
            },
        })
    }
}
