//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store construction and the shared handler state
//! - `routes/`: HTTP handlers, one file per entity
//! - `links.rs`: static hypermedia hints attached to every entity response
//! - `envelope.rs`: the uniform `{message, data, _links}` response body
//! - `dto.rs`: request bodies and presence checks
//! - `errors.rs`: mapping failures onto 422 / 500 envelopes

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod envelope;
pub mod errors;
pub mod links;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Base path every entity route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: AppServices) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest(API_PREFIX, routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(Extension(services)),
        )
}
