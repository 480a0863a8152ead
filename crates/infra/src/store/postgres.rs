//! Postgres-backed store implementation.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (foreign key violation) | `23503` | `Constraint` |
//! | Database (not-null violation) | `23502` | `Constraint` |
//! | Database (check / unique violation) | `23514` / `23505` | `Constraint` |
//! | RowNotFound | N/A | `NotFound` (only where an id is known) |
//! | Anything else | N/A | `Database` |
//!
//! Updates and deletes use `RETURNING` with `fetch_optional`, so a missing row
//! surfaces as `NotFound` rather than an empty success.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use taskboard_core::{
    Comment, CommentFilter, CommentId, Member, MemberId, NewComment, NewMember, NewProject,
    NewTask, Project, ProjectId, ProjectTasks, Task, TaskChanges, TaskId, TaskWithComments,
};

use super::r#trait::{Store, StoreError, StoreResult};

/// Tables are created in dependency order; foreign keys are restrictive.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT        NOT NULL,
        description TEXT        NOT NULL,
        start_date  TIMESTAMPTZ NOT NULL,
        end_date    TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS members (
        id         BIGSERIAL PRIMARY KEY,
        name       TEXT   NOT NULL,
        project_id BIGINT NOT NULL REFERENCES projects (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT        NOT NULL,
        description TEXT        NOT NULL,
        expect_term TIMESTAMPTZ NOT NULL,
        piority     TEXT        NOT NULL,
        project_id  BIGINT      NOT NULL REFERENCES projects (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id      BIGSERIAL PRIMARY KEY,
        text    TEXT   NOT NULL,
        task_id BIGINT NOT NULL REFERENCES tasks (id)
    )
    "#,
];

const PROJECT_COLUMNS: &str = "id, name, description, start_date, end_date";
const MEMBER_COLUMNS: &str = "id, name, project_id";
const TASK_COLUMNS: &str = "id, name, description, expect_term, piority, project_id";
const COMMENT_COLUMNS: &str = "id, text, task_id";

/// Postgres-backed store.
///
/// `PgPool` is cheap to clone and safe to share; concurrent writers are left
/// to Postgres' own row locking.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tables if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl Store for PostgresStore {
    #[instrument(skip(self), err)]
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let rows = sqlx::query(&format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_projects", e))?;
        rows.iter().map(project_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        let row = sqlx::query(&format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_project", e))?;
        row.as_ref().map(project_from_row).transpose()
    }

    #[instrument(skip(self, input), err)]
    async fn create_project(&self, input: NewProject) -> StoreResult<Project> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO projects (name, description, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_project", e))?;
        project_from_row(&row)
    }

    #[instrument(skip(self, input), err)]
    async fn update_project(&self, id: ProjectId, input: NewProject) -> StoreResult<Project> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE projects
            SET name = $2, description = $3, start_date = $4, end_date = $5
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(id.get())
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_project", e))?;
        match row {
            Some(row) => project_from_row(&row),
            None => Err(StoreError::not_found::<Project>(id)),
        }
    }

    #[instrument(skip(self), err)]
    async fn delete_project(&self, id: ProjectId) -> StoreResult<Project> {
        let row = sqlx::query(&format!(
            "DELETE FROM projects WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_project", e))?;
        match row {
            Some(row) => project_from_row(&row),
            None => Err(StoreError::not_found::<Project>(id)),
        }
    }

    #[instrument(skip(self), err)]
    async fn list_members(&self, project_id: ProjectId) -> StoreResult<Vec<Member>> {
        let rows = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE project_id = $1 ORDER BY id"
        ))
        .bind(project_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_members", e))?;
        rows.iter().map(member_from_row).collect()
    }

    #[instrument(skip(self, input), err)]
    async fn create_member(&self, input: NewMember) -> StoreResult<Member> {
        let row = sqlx::query(&format!(
            "INSERT INTO members (name, project_id) VALUES ($1, $2) RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(input.project_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_member", e))?;
        member_from_row(&row)
    }

    #[instrument(skip(self), err)]
    async fn delete_member(&self, id: MemberId) -> StoreResult<Member> {
        let row = sqlx::query(&format!(
            "DELETE FROM members WHERE id = $1 RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_member", e))?;
        match row {
            Some(row) => member_from_row(&row),
            None => Err(StoreError::not_found::<Member>(id)),
        }
    }

    #[instrument(skip(self), err)]
    async fn project_tasks(&self, project_id: ProjectId) -> StoreResult<Option<ProjectTasks>> {
        let exists = sqlx::query("SELECT 1 FROM projects WHERE id = $1")
            .bind(project_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("project_tasks", e))?;
        if exists.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY id"
        ))
        .bind(project_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("project_tasks", e))?;
        let tasks = rows.iter().map(task_from_row).collect::<StoreResult<Vec<_>>>()?;
        Ok(Some(ProjectTasks { tasks }))
    }

    #[instrument(skip(self, input), err)]
    async fn create_task(&self, input: NewTask) -> StoreResult<Task> {
        // Missing columns bind as NULL and trip the NOT NULL constraints.
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO tasks (name, description, expect_term, piority, project_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(input.name)
        .bind(input.description)
        .bind(input.expect_term)
        .bind(input.piority)
        .bind(input.project_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_task", e))?;
        task_from_row(&row)
    }

    #[instrument(skip(self), err)]
    async fn get_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_task", e))?;
        row.as_ref().map(task_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn get_task_with_comments(&self, id: TaskId) -> StoreResult<Option<TaskWithComments>> {
        let Some(task) = self.get_task(id).await? else {
            return Ok(None);
        };
        let comments = self.find_comments(CommentFilter::ByTask(id)).await?;
        Ok(Some(TaskWithComments { task, comments }))
    }

    #[instrument(skip(self, changes), err)]
    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Task> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE tasks
            SET name        = COALESCE($2, name),
                description = COALESCE($3, description),
                expect_term = COALESCE($4, expect_term),
                piority     = COALESCE($5, piority)
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id.get())
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.expect_term)
        .bind(changes.piority)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_task", e))?;
        match row {
            Some(row) => task_from_row(&row),
            None => Err(StoreError::not_found::<Task>(id)),
        }
    }

    #[instrument(skip(self), err)]
    async fn delete_task(&self, id: TaskId) -> StoreResult<Task> {
        let row = sqlx::query(&format!("DELETE FROM tasks WHERE id = $1 RETURNING {TASK_COLUMNS}"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_task", e))?;
        match row {
            Some(row) => task_from_row(&row),
            None => Err(StoreError::not_found::<Task>(id)),
        }
    }

    #[instrument(skip(self), err)]
    async fn find_comments(&self, filter: CommentFilter) -> StoreResult<Vec<Comment>> {
        let (column, value) = match filter {
            CommentFilter::ById(id) => ("id", id.get()),
            CommentFilter::ByTask(task_id) => ("task_id", task_id.get()),
        };
        let rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE {column} = $1 ORDER BY id"
        ))
        .bind(value)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_comments", e))?;
        rows.iter().map(comment_from_row).collect()
    }

    #[instrument(skip(self, input), err)]
    async fn create_comment(&self, input: NewComment) -> StoreResult<Comment> {
        let row = sqlx::query(&format!(
            "INSERT INTO comments (text, task_id) VALUES ($1, $2) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(&input.text)
        .bind(input.task_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_comment", e))?;
        comment_from_row(&row)
    }

    #[instrument(skip(self), err)]
    async fn delete_comment(&self, id: CommentId) -> StoreResult<Comment> {
        let row = sqlx::query(&format!(
            "DELETE FROM comments WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_comment", e))?;
        match row {
            Some(row) => comment_from_row(&row),
            None => Err(StoreError::not_found::<Comment>(id)),
        }
    }

    #[instrument(skip(self), err)]
    async fn clear_all(&self) -> StoreResult<()> {
        for table in ["comments", "tasks", "members", "projects"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("clear_all", e))?;
        }
        Ok(())
    }
}

fn project_from_row(row: &PgRow) -> StoreResult<Project> {
    Ok(Project {
        id: ProjectId::new(row.try_get("id").map_err(decode_error)?),
        name: row.try_get("name").map_err(decode_error)?,
        description: row.try_get("description").map_err(decode_error)?,
        start_date: row.try_get("start_date").map_err(decode_error)?,
        end_date: row.try_get("end_date").map_err(decode_error)?,
    })
}

fn member_from_row(row: &PgRow) -> StoreResult<Member> {
    Ok(Member {
        id: MemberId::new(row.try_get("id").map_err(decode_error)?),
        name: row.try_get("name").map_err(decode_error)?,
        project_id: ProjectId::new(row.try_get("project_id").map_err(decode_error)?),
    })
}

fn task_from_row(row: &PgRow) -> StoreResult<Task> {
    Ok(Task {
        id: TaskId::new(row.try_get("id").map_err(decode_error)?),
        name: row.try_get("name").map_err(decode_error)?,
        description: row.try_get("description").map_err(decode_error)?,
        expect_term: row.try_get("expect_term").map_err(decode_error)?,
        piority: row.try_get("piority").map_err(decode_error)?,
        project_id: ProjectId::new(row.try_get("project_id").map_err(decode_error)?),
    })
}

fn comment_from_row(row: &PgRow) -> StoreResult<Comment> {
    Ok(Comment {
        id: CommentId::new(row.try_get("id").map_err(decode_error)?),
        text: row.try_get("text").map_err(decode_error)?,
        task_id: TaskId::new(row.try_get("task_id").map_err(decode_error)?),
    })
}

fn decode_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(format!("failed to decode row: {e}"))
}

fn map_sqlx_error(operation: &'static str, e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) => match db.code().as_deref() {
            Some("23503" | "23502" | "23505" | "23514") => {
                StoreError::Constraint(format!("{operation}: {}", db.message()))
            }
            _ => StoreError::Database(format!("{operation}: {e}")),
        },
        _ => StoreError::Database(format!("{operation}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    /// Runs only against a live database; the suite stays green without one.
    async fn connect() -> Option<PostgresStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.ok()?;
        let store = PostgresStore::new(pool);
        store.ensure_schema().await.ok()?;
        Some(store)
    }

    #[tokio::test]
    async fn project_lifecycle_against_postgres() {
        let Some(store) = connect().await else {
            return;
        };

        let created = store
            .create_project(NewProject {
                name: "pg".to_string(),
                description: "roundtrip".to_string(),
                start_date: Utc::now(),
                end_date: Utc::now(),
            })
            .await
            .unwrap();

        let fetched = store.get_project(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "pg");

        store.delete_project(created.id).await.unwrap();
        assert!(matches!(
            store.delete_project(created.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
