//! Tasks and their write inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comment::Comment;
use crate::entity::Entity;
use crate::id::{ProjectId, TaskId};

/// A stored task.
///
/// `piority` is a free-text label; the field name is part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub expect_term: DateTime<Utc>,
    pub piority: String,
    pub project_id: ProjectId,
}

impl Entity for Task {
    type Id = TaskId;
    const NAME: &'static str = "task";
}

/// Insert input for a task.
///
/// The HTTP layer only requires the parent project; the store enforces that
/// every other column is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: Option<String>,
    pub description: Option<String>,
    pub piority: Option<String>,
    pub expect_term: Option<DateTime<Utc>>,
    pub project_id: ProjectId,
}

impl NewTask {
    /// Name of the first required column that is missing, if any.
    pub fn missing_column(&self) -> Option<&'static str> {
        if self.name.is_none() {
            Some("name")
        } else if self.description.is_none() {
            Some("description")
        } else if self.piority.is_none() {
            Some("piority")
        } else if self.expect_term.is_none() {
            Some("expectTerm")
        } else {
            None
        }
    }
}

/// Partial update for a task. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub piority: Option<String>,
    pub expect_term: Option<DateTime<Utc>>,
}

impl TaskChanges {
    pub fn apply_to(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(piority) = self.piority {
            task.piority = piority;
        }
        if let Some(expect_term) = self.expect_term {
            task.expect_term = expect_term;
        }
    }
}

/// A task with its comments inlined under `"Comment"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWithComments {
    #[serde(flatten)]
    pub task: Task,
    #[serde(rename = "Comment")]
    pub comments: Vec<Comment>,
}
