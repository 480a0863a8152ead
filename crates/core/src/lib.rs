//! `taskboard-core`: domain records for the project/task board.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod comment;
pub mod entity;
pub mod error;
pub mod id;
pub mod member;
pub mod project;
pub mod task;

pub use comment::{Comment, CommentFilter, NewComment};
pub use entity::Entity;
pub use error::DomainError;
pub use id::{CommentId, MemberId, ProjectId, TaskId};
pub use member::{Member, NewMember};
pub use project::{NewProject, Project, ProjectTasks};
pub use task::{NewTask, Task, TaskChanges, TaskWithComments};
