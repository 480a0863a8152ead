use std::sync::Arc;

use axum::{extract::Extension, response::Response};

use crate::app::envelope::{self, Status, OK, SERVER_ERROR};
use crate::app::services::AppServices;

/// Wipe every table and regenerate demo data. Unauthenticated.
pub async fn run_seed(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match taskboard_infra::seed(services.store.as_ref(), &services.seed_options).await {
        Ok(_) => envelope::message_only(Status::Ok, OK),
        Err(err) => {
            tracing::error!(error = %err, "seeding failed");
            envelope::message_only(Status::ServerError, SERVER_ERROR)
        }
    }
}
