//! Comments attached to tasks.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{CommentId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub task_id: TaskId,
}

impl Entity for Comment {
    type Id = CommentId;
    const NAME: &'static str = "comment";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub text: String,
    pub task_id: TaskId,
}

/// Selection criteria for comment lookups.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommentFilter {
    /// Match the comment's own id.
    ById(CommentId),
    /// Match every comment on a task.
    ByTask(TaskId),
}

impl CommentFilter {
    pub fn matches(&self, comment: &Comment) -> bool {
        match *self {
            Self::ById(id) => comment.id == id,
            Self::ByTask(task_id) => comment.task_id == task_id,
        }
    }
}
