use axum::response::Response;
use serde::Serialize;

use crate::app::envelope::{self, OK, SERVER_ERROR};
use crate::app::errors::{self, ApiError};
use crate::app::links::Resource;

/// Finish a handler with the default `ok` / `error` messages.
pub fn respond<T: Serialize>(resource: Resource, result: Result<T, ApiError>) -> Response {
    respond_with(resource, OK, SERVER_ERROR, result)
}

pub fn respond_with<T: Serialize>(
    resource: Resource,
    success_message: &'static str,
    server_message: &'static str,
    result: Result<T, ApiError>,
) -> Response {
    match result {
        Ok(data) => envelope::success(resource, success_message, data),
        Err(err) => errors::error_response(err, resource, server_message),
    }
}
