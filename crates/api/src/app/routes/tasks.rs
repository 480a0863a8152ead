use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    response::Response,
    routing::get,
    Router,
};

use taskboard_core::{ProjectId, TaskId};

use crate::app::dto::{self, TaskBody};
use crate::app::errors::ApiError;
use crate::app::links::Resource;
use crate::app::routes::common::respond;
use crate::app::routes::comments;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/:task_id", get(get_task).put(update_task).delete(delete_task))
        .route(
            "/:task_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
}

/// Responds with `{ "Task": [...] }`, or `null` data for an unknown project.
pub async fn list_project_tasks(
    Extension(services): Extension<Arc<AppServices>>,
    Path(project_id): Path<String>,
) -> Response {
    let result = async {
        let project_id: ProjectId = project_id.parse()?;
        Ok::<_, ApiError>(services.store.project_tasks(project_id).await?)
    }
    .await;
    respond(Resource::Tasks, result)
}

/// Only the parent project is checked here; missing columns are rejected by
/// the store.
pub async fn create_task(
    Extension(services): Extension<Arc<AppServices>>,
    Path(project_id): Path<String>,
    body: Bytes,
) -> Response {
    let result = async {
        let body: TaskBody = dto::parse_body(&body)?;
        let project_id: ProjectId = project_id.parse()?;
        Ok::<_, ApiError>(services.store.create_task(body.into_new_task(project_id)).await?)
    }
    .await;
    respond(Resource::Tasks, result)
}

pub async fn get_task(
    Extension(services): Extension<Arc<AppServices>>,
    Path(task_id): Path<String>,
) -> Response {
    let result = async {
        let id: TaskId = task_id.parse()?;
        Ok::<_, ApiError>(services.store.get_task_with_comments(id).await?)
    }
    .await;
    respond(Resource::Tasks, result)
}

pub async fn update_task(
    Extension(services): Extension<Arc<AppServices>>,
    Path(task_id): Path<String>,
    body: Bytes,
) -> Response {
    let result = async {
        let body: TaskBody = dto::parse_body(&body)?;
        let id: TaskId = task_id.parse()?;
        Ok::<_, ApiError>(services.store.update_task(id, body.into_changes()).await?)
    }
    .await;
    respond(Resource::Tasks, result)
}

pub async fn delete_task(
    Extension(services): Extension<Arc<AppServices>>,
    Path(task_id): Path<String>,
) -> Response {
    let result = async {
        let id: TaskId = task_id.parse()?;
        Ok::<_, ApiError>(services.store.delete_task(id).await?)
    }
    .await;
    respond(Resource::Tasks, result)
}
