//! Uniform response body: `{ message, data?, _links? }`.
//!
//! Building a response never fails; the only side effect is serialisation.

use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::links::{LinkTable, Resource};

pub const OK: &str = "ok";
pub const PROJECTS_LISTED: &str = "Dane pobrano pomyslnie";
pub const PROJECT_CREATED: &str = "projekt został dodany.";
pub const INVALID_INPUT: &str = "Nieprawdiłowe dane";
pub const TASK_NOT_FOUND: &str = "Nieprawdiłowe dane. Task o tym ID nie istnieje";
pub const SERVER_ERROR: &str = "error";
pub const PROJECTS_SERVER_ERROR: &str = "Błąd serwera. Spróbuj dodać pyanie później.";

/// The only statuses an entity route ever answers with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    Unprocessable,
    ServerError,
}

impl Status {
    pub const fn code(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<LinkTable>,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            data: None,
            links: None,
        }
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_links(mut self, links: LinkTable) -> Self {
        self.links = Some(links);
        self
    }

    pub fn into_response(self, status: Status) -> Response {
        (status.code(), Json(self)).into_response()
    }
}

/// 200 with payload and the resource's links.
///
/// `data` is serialised even when it is `null` (e.g. a lookup that found
/// nothing).
pub fn success<T: Serialize>(resource: Resource, message: &'static str, data: T) -> Response {
    Envelope::new(message)
        .with_data(data)
        .with_links(resource.links())
        .into_response(Status::Ok)
}

/// Error envelope without a payload.
pub fn failure(status: Status, message: &'static str, resource: Resource) -> Response {
    Envelope::<()>::new(message)
        .with_links(resource.links())
        .into_response(status)
}

/// Bare `{ message }` body, used by routes not tied to an entity.
pub fn message_only(status: Status, message: &'static str) -> Response {
    Envelope::<()>::new(message).into_response(status)
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_carries_data_and_links() {
        let response = success(Resource::Projects, OK, vec![1, 2]);
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "ok");
        assert_eq!(body["data"], serde_json::json!([1, 2]));
        assert_eq!(body["_links"]["getAll"]["href"], "/api/v1/projects");
    }

    #[tokio::test]
    async fn missing_record_serialises_as_null_data() {
        let body = body_json(success(Resource::Tasks, OK, None::<u8>)).await;
        let object = body.as_object().unwrap();
        assert!(object.contains_key("data"));
        assert!(object["data"].is_null());
    }

    #[tokio::test]
    async fn failure_omits_data() {
        let response = failure(Status::Unprocessable, INVALID_INPUT, Resource::Members);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert!(body.get("data").is_none());
        assert_eq!(body["message"], INVALID_INPUT);
        assert_eq!(body["_links"]["delete"]["href"], "/api/v1/members/{membersId]");
    }

    #[tokio::test]
    async fn message_only_has_no_links() {
        let body = body_json(message_only(Status::ServerError, SERVER_ERROR)).await;
        assert_eq!(body, serde_json::json!({ "message": "error" }));
    }
}
