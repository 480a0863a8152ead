use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    response::Response,
    routing::delete,
    Router,
};

use taskboard_core::{MemberId, NewMember, ProjectId};

use crate::app::dto::{self, MemberBody};
use crate::app::errors::ApiError;
use crate::app::links::Resource;
use crate::app::routes::common::respond;
use crate::app::services::AppServices;

/// Member deletion. Listing and creation hang off the owning project.
pub fn router() -> Router {
    Router::new().route("/:member_id", delete(delete_member))
}

pub async fn list_members(
    Extension(services): Extension<Arc<AppServices>>,
    Path(project_id): Path<String>,
) -> Response {
    let result = async {
        let project_id: ProjectId = project_id.parse()?;
        Ok::<_, ApiError>(services.store.list_members(project_id).await?)
    }
    .await;
    respond(Resource::Members, result)
}

pub async fn create_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(project_id): Path<String>,
    body: Bytes,
) -> Response {
    let result = async {
        let body: MemberBody = dto::parse_body(&body)?;
        let name = dto::required(body.name)?;
        let project_id: ProjectId = project_id.parse()?;
        Ok::<_, ApiError>(services.store.create_member(NewMember { name, project_id }).await?)
    }
    .await;
    respond(Resource::Members, result)
}

pub async fn delete_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(member_id): Path<String>,
) -> Response {
    let result = async {
        let id: MemberId = member_id.parse()?;
        Ok::<_, ApiError>(services.store.delete_member(id).await?)
    }
    .await;
    respond(Resource::Members, result)
}
