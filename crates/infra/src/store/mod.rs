//! Persistence gateway for projects, members, tasks and comments.
//!
//! Handlers only see the [`Store`] trait; the concrete backend is picked at
//! startup and injected as a [`SharedStore`].

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use r#trait::{SharedStore, Store, StoreError, StoreResult};
