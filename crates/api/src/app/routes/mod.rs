use axum::{routing::get, Router};

pub mod comments;
pub mod common;
pub mod members;
pub mod projects;
pub mod seed;
pub mod system;
pub mod tasks;

/// Router for every entity endpoint (mounted under `/api/v1`).
pub fn router() -> Router {
    Router::new()
        .route("/seed", get(seed::run_seed))
        .nest("/projects", projects::router())
        .nest("/members", members::router())
        .nest("/tasks", tasks::router())
        .nest("/comments", comments::router())
}
