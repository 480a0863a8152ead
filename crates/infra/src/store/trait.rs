use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use taskboard_core::{
    Comment, CommentFilter, CommentId, Entity, Member, MemberId, NewComment, NewMember,
    NewProject, NewTask, Project, ProjectId, ProjectTasks, Task, TaskChanges, TaskId,
    TaskWithComments,
};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store handle shared by every request handler.
pub type SharedStore = Arc<dyn Store>;

/// Persistence failure.
///
/// The HTTP layer does not distinguish between these; they are kept apart so
/// logs say what actually went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An update or delete targeted an id with no row.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A foreign key, not-null or similar integrity rule rejected the write.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// Connection, protocol or any other backend failure.
    #[error("database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn not_found<E: Entity>(id: E::Id) -> Self
    where
        E::Id: Into<i64>,
    {
        Self::NotFound {
            entity: E::NAME,
            id: id.into(),
        }
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }
}

/// Typed create/read/update/delete operations over the four entities.
///
/// Every method is a single round-trip from the caller's point of view.
/// Referential integrity is restrictive: deleting a parent that still has
/// children fails with [`StoreError::Constraint`].
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    async fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>>;

    async fn create_project(&self, input: NewProject) -> StoreResult<Project>;

    /// Replace every field of an existing project.
    async fn update_project(&self, id: ProjectId, input: NewProject) -> StoreResult<Project>;

    async fn delete_project(&self, id: ProjectId) -> StoreResult<Project>;

    async fn list_members(&self, project_id: ProjectId) -> StoreResult<Vec<Member>>;

    async fn create_member(&self, input: NewMember) -> StoreResult<Member>;

    async fn delete_member(&self, id: MemberId) -> StoreResult<Member>;

    /// Tasks of a project, or `None` when the project does not exist.
    async fn project_tasks(&self, project_id: ProjectId) -> StoreResult<Option<ProjectTasks>>;

    async fn create_task(&self, input: NewTask) -> StoreResult<Task>;

    async fn get_task(&self, id: TaskId) -> StoreResult<Option<Task>>;

    async fn get_task_with_comments(&self, id: TaskId) -> StoreResult<Option<TaskWithComments>>;

    /// Apply the provided fields; omitted ones keep their stored value.
    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Task>;

    async fn delete_task(&self, id: TaskId) -> StoreResult<Task>;

    async fn find_comments(&self, filter: CommentFilter) -> StoreResult<Vec<Comment>>;

    async fn create_comment(&self, input: NewComment) -> StoreResult<Comment>;

    async fn delete_comment(&self, id: CommentId) -> StoreResult<Comment>;

    /// Remove every row, children first: comments, tasks, members, projects.
    async fn clear_all(&self) -> StoreResult<()>;
}
