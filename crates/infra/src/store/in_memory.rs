use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use taskboard_core::{
    Comment, CommentFilter, CommentId, Member, MemberId, NewComment, NewMember, NewProject,
    NewTask, Project, ProjectId, ProjectTasks, Task, TaskChanges, TaskId, TaskWithComments,
};

use super::r#trait::{Store, StoreError, StoreResult};

#[derive(Debug)]
struct Tables {
    projects: BTreeMap<ProjectId, Project>,
    members: BTreeMap<MemberId, Member>,
    tasks: BTreeMap<TaskId, Task>,
    comments: BTreeMap<CommentId, Comment>,
    // Sequences survive `clear_all`, like serial columns do.
    next_project: i64,
    next_member: i64,
    next_task: i64,
    next_comment: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            projects: BTreeMap::new(),
            members: BTreeMap::new(),
            tasks: BTreeMap::new(),
            comments: BTreeMap::new(),
            next_project: 1,
            next_member: 1,
            next_task: 1,
            next_comment: 1,
        }
    }
}

fn take_next(seq: &mut i64) -> i64 {
    let id = *seq;
    *seq += 1;
    id
}

/// In-memory store for tests/dev.
///
/// Emulates the relational rules the Postgres schema enforces: store-assigned
/// ids, required columns and restrictive foreign keys.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Database("in-memory tables poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Database("in-memory tables poisoned".to_string()))
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.read()?.projects.values().cloned().collect())
    }

    async fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn create_project(&self, input: NewProject) -> StoreResult<Project> {
        let mut t = self.write()?;
        let id = ProjectId::new(take_next(&mut t.next_project));
        let project = input.into_project(id);
        t.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: ProjectId, input: NewProject) -> StoreResult<Project> {
        let mut t = self.write()?;
        let slot = t
            .projects
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found::<Project>(id))?;
        *slot = input.into_project(id);
        Ok(slot.clone())
    }

    async fn delete_project(&self, id: ProjectId) -> StoreResult<Project> {
        let mut t = self.write()?;
        if !t.projects.contains_key(&id) {
            return Err(StoreError::not_found::<Project>(id));
        }
        if t.members.values().any(|m| m.project_id == id) {
            return Err(StoreError::constraint(format!(
                "project {id} is still referenced by members"
            )));
        }
        if t.tasks.values().any(|task| task.project_id == id) {
            return Err(StoreError::constraint(format!(
                "project {id} is still referenced by tasks"
            )));
        }
        t.projects
            .remove(&id)
            .ok_or_else(|| StoreError::not_found::<Project>(id))
    }

    async fn list_members(&self, project_id: ProjectId) -> StoreResult<Vec<Member>> {
        Ok(self
            .read()?
            .members
            .values()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_member(&self, input: NewMember) -> StoreResult<Member> {
        let mut t = self.write()?;
        if !t.projects.contains_key(&input.project_id) {
            return Err(StoreError::constraint(format!(
                "member references missing project {}",
                input.project_id
            )));
        }
        let member = Member {
            id: MemberId::new(take_next(&mut t.next_member)),
            name: input.name,
            project_id: input.project_id,
        };
        t.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn delete_member(&self, id: MemberId) -> StoreResult<Member> {
        self.write()?
            .members
            .remove(&id)
            .ok_or_else(|| StoreError::not_found::<Member>(id))
    }

    async fn project_tasks(&self, project_id: ProjectId) -> StoreResult<Option<ProjectTasks>> {
        let t = self.read()?;
        if !t.projects.contains_key(&project_id) {
            return Ok(None);
        }
        let tasks = t
            .tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect();
        Ok(Some(ProjectTasks { tasks }))
    }

    async fn create_task(&self, input: NewTask) -> StoreResult<Task> {
        if let Some(column) = input.missing_column() {
            return Err(StoreError::constraint(format!(
                "task column {column} must not be null"
            )));
        }
        let mut t = self.write()?;
        if !t.projects.contains_key(&input.project_id) {
            return Err(StoreError::constraint(format!(
                "task references missing project {}",
                input.project_id
            )));
        }
        let (Some(name), Some(description), Some(piority), Some(expect_term)) =
            (input.name, input.description, input.piority, input.expect_term)
        else {
            return Err(StoreError::constraint("task is missing a required column"));
        };
        let task = Task {
            id: TaskId::new(take_next(&mut t.next_task)),
            name,
            description,
            expect_term,
            piority,
            project_id: input.project_id,
        };
        t.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn get_task_with_comments(&self, id: TaskId) -> StoreResult<Option<TaskWithComments>> {
        let t = self.read()?;
        let Some(task) = t.tasks.get(&id).cloned() else {
            return Ok(None);
        };
        let comments = t
            .comments
            .values()
            .filter(|c| c.task_id == id)
            .cloned()
            .collect();
        Ok(Some(TaskWithComments { task, comments }))
    }

    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Task> {
        let mut t = self.write()?;
        let task = t
            .tasks
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found::<Task>(id))?;
        changes.apply_to(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> StoreResult<Task> {
        let mut t = self.write()?;
        if !t.tasks.contains_key(&id) {
            return Err(StoreError::not_found::<Task>(id));
        }
        if t.comments.values().any(|c| c.task_id == id) {
            return Err(StoreError::constraint(format!(
                "task {id} is still referenced by comments"
            )));
        }
        t.tasks
            .remove(&id)
            .ok_or_else(|| StoreError::not_found::<Task>(id))
    }

    async fn find_comments(&self, filter: CommentFilter) -> StoreResult<Vec<Comment>> {
        Ok(self
            .read()?
            .comments
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn create_comment(&self, input: NewComment) -> StoreResult<Comment> {
        let mut t = self.write()?;
        if !t.tasks.contains_key(&input.task_id) {
            return Err(StoreError::constraint(format!(
                "comment references missing task {}",
                input.task_id
            )));
        }
        let comment = Comment {
            id: CommentId::new(take_next(&mut t.next_comment)),
            text: input.text,
            task_id: input.task_id,
        };
        t.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, id: CommentId) -> StoreResult<Comment> {
        self.write()?
            .comments
            .remove(&id)
            .ok_or_else(|| StoreError::not_found::<Comment>(id))
    }

    async fn clear_all(&self) -> StoreResult<()> {
        let mut t = self.write()?;
        t.comments.clear();
        t.tasks.clear();
        t.members.clear();
        t.projects.clear();
        Ok(())
    }
}
