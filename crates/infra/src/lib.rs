//! Infrastructure layer: persistence gateway and demo data seeding.

pub mod seed;
pub mod store;

pub use seed::{seed, SeedOptions, SeedReport};
pub use store::{InMemoryStore, PostgresStore, SharedStore, Store, StoreError, StoreResult};
