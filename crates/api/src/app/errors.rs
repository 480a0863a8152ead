//! Failure mapping: validation problems become 422, everything else 500.
//!
//! Store failures are not told apart on the wire: a missing id
//! on update/delete and a dead connection produce the same 500. The cause is
//! only logged.

use axum::response::Response;
use thiserror::Error;

use taskboard_core::DomainError;
use taskboard_infra::StoreError;

use super::envelope::{self, Status, INVALID_INPUT};
use super::links::Resource;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required identifier or field was missing, or a referenced parent
    /// does not exist. Carries the client-facing message.
    #[error("{0}")]
    Validation(&'static str),

    /// A path identifier that is present but not numeric.
    #[error(transparent)]
    InvalidId(DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed request body: {0}")]
    Body(#[from] serde_json::Error),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if err.is_validation() {
            Self::Validation(INVALID_INPUT)
        } else {
            Self::InvalidId(err)
        }
    }
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::Validation(_) => Status::Unprocessable,
            Self::InvalidId(_) | Self::Store(_) | Self::Body(_) => Status::ServerError,
        }
    }
}

/// Render `err` as an envelope for `resource`.
///
/// `server_message` is the route's generic 500 text.
pub fn error_response(err: ApiError, resource: Resource, server_message: &'static str) -> Response {
    match err {
        ApiError::Validation(message) => {
            tracing::debug!(resource = resource.as_str(), reason = message, "rejected request");
            envelope::failure(Status::Unprocessable, message, resource)
        }
        other => {
            tracing::error!(resource = resource.as_str(), error = %other, "request failed");
            envelope::failure(Status::ServerError, server_message, resource)
        }
    }
}
