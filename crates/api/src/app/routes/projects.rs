use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    response::Response,
    routing::get,
    Router,
};

use taskboard_core::ProjectId;

use crate::app::dto::{self, ProjectBody};
use crate::app::envelope::{PROJECTS_LISTED, PROJECTS_SERVER_ERROR, PROJECT_CREATED};
use crate::app::errors::ApiError;
use crate::app::links::Resource;
use crate::app::routes::common::{respond, respond_with};
use crate::app::routes::{members, tasks};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:project_id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route(
            "/:project_id/members",
            get(members::list_members).post(members::create_member),
        )
        .route(
            "/:project_id/tasks",
            get(tasks::list_project_tasks).post(tasks::create_task),
        )
}

pub async fn list_projects(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let result = services.store.list_projects().await.map_err(ApiError::from);
    respond_with(Resource::Projects, PROJECTS_LISTED, PROJECTS_SERVER_ERROR, result)
}

pub async fn create_project(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Response {
    let result = async {
        let input = dto::parse_body::<ProjectBody>(&body)?.into_new_project()?;
        Ok::<_, ApiError>(services.store.create_project(input).await?)
    }
    .await;
    respond_with(Resource::Projects, PROJECT_CREATED, PROJECTS_SERVER_ERROR, result)
}

pub async fn get_project(
    Extension(services): Extension<Arc<AppServices>>,
    Path(project_id): Path<String>,
) -> Response {
    let result = async {
        let id: ProjectId = project_id.parse()?;
        Ok::<_, ApiError>(services.store.get_project(id).await?)
    }
    .await;
    respond(Resource::Projects, result)
}

/// Full replace; every field must be supplied.
pub async fn update_project(
    Extension(services): Extension<Arc<AppServices>>,
    Path(project_id): Path<String>,
    body: Bytes,
) -> Response {
    let result = async {
        let input = dto::parse_body::<ProjectBody>(&body)?.into_new_project()?;
        let id: ProjectId = project_id.parse()?;
        Ok::<_, ApiError>(services.store.update_project(id, input).await?)
    }
    .await;
    respond(Resource::Projects, result)
}

pub async fn delete_project(
    Extension(services): Extension<Arc<AppServices>>,
    Path(project_id): Path<String>,
) -> Response {
    let result = async {
        let id: ProjectId = project_id.parse()?;
        Ok::<_, ApiError>(services.store.delete_project(id).await?)
    }
    .await;
    respond(Resource::Projects, result)
}
