use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    response::Response,
    routing::delete,
    Router,
};

use taskboard_core::{CommentFilter, CommentId, NewComment, TaskId};

use crate::app::dto::{self, CommentBody};
use crate::app::envelope::TASK_NOT_FOUND;
use crate::app::errors::ApiError;
use crate::app::links::Resource;
use crate::app::routes::common::respond;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/:comment_id", delete(delete_comment))
}

/// Lists comments whose *own* id equals the path segment, not the comments
/// belonging to that task.
pub async fn list_comments(
    Extension(services): Extension<Arc<AppServices>>,
    Path(task_id): Path<String>,
) -> Response {
    let result = async {
        let id: CommentId = task_id.parse()?;
        Ok::<_, ApiError>(services.store.find_comments(CommentFilter::ById(id)).await?)
    }
    .await;
    respond(Resource::Comments, result)
}

/// The task lookup must complete before the insert is issued.
pub async fn create_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Path(task_id): Path<String>,
    body: Bytes,
) -> Response {
    let result = async {
        let body: CommentBody = dto::parse_body(&body)?;
        let text = dto::required(body.text)?;
        let task_id: TaskId = task_id.parse()?;

        if services.store.get_task(task_id).await?.is_none() {
            return Err(ApiError::Validation(TASK_NOT_FOUND));
        }

        Ok::<_, ApiError>(services.store.create_comment(NewComment { text, task_id }).await?)
    }
    .await;
    respond(Resource::Comments, result)
}

pub async fn delete_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Path(comment_id): Path<String>,
) -> Response {
    let result = async {
        let id: CommentId = comment_id.parse()?;
        Ok::<_, ApiError>(services.store.delete_comment(id).await?)
    }
    .await;
    respond(Resource::Comments, result)
}
