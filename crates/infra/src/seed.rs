//! Demo data seeding.
//!
//! Wipes every table and rebuilds a nested tree:
//! projects → members → tasks → one comment per task.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use taskboard_core::{NewComment, NewMember, NewProject, NewTask};

use crate::store::{Store, StoreResult};

/// Upper bound of tasks drawn per member (lower bound is 1).
pub const MAX_TASKS_PER_MEMBER: usize = 6;

pub const DEFAULT_RECORD_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    /// Number of projects, and of members per project.
    pub record_count: usize,
    /// Fixed RNG seed; `None` draws task counts from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            record_count: DEFAULT_RECORD_COUNT,
            rng_seed: None,
        }
    }
}

/// Row counts produced by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub projects: usize,
    pub members: usize,
    pub tasks: usize,
    pub comments: usize,
}

/// Replace all data in `store` with a freshly generated demo tree.
///
/// Not transactional: a failure part-way leaves whatever was written so far.
pub async fn seed(store: &dyn Store, options: &SeedOptions) -> StoreResult<SeedReport> {
    let mut rng = match options.rng_seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    store.clear_all().await?;
    tracing::debug!("cleared all tables before seeding");

    let mut report = SeedReport::default();
    let n = options.record_count;

    for i in 1..=n {
        let now = Utc::now();
        let project = store
            .create_project(NewProject {
                name: format!("Projekt {i}"),
                description: format!("Opis Projektu {i}"),
                start_date: now,
                end_date: now,
            })
            .await?;
        report.projects += 1;

        for j in 1..=n {
            store
                .create_member(NewMember {
                    name: format!("Pracownik {i}-{j}"),
                    project_id: project.id,
                })
                .await?;
            report.members += 1;

            let task_count = rng.random_range(1..=MAX_TASKS_PER_MEMBER);
            for k in 1..=task_count {
                let task = store
                    .create_task(NewTask {
                        name: Some(format!("Zadanie {i}-{j}-{k}")),
                        description: Some(format!("Opis Zadania {i}-{j}-{k}")),
                        piority: Some("normal".to_string()),
                        expect_term: Some(Utc::now()),
                        project_id: project.id,
                    })
                    .await?;
                report.tasks += 1;

                store
                    .create_comment(NewComment {
                        text: format!("Komentarz do Zadania {i}-{j}-{k}"),
                        task_id: task.id,
                    })
                    .await?;
                report.comments += 1;
            }
        }
    }

    tracing::info!(
        projects = report.projects,
        members = report.members,
        tasks = report.tasks,
        comments = report.comments,
        "seeded demo data"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use taskboard_core::CommentFilter;

    use super::*;
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn builds_the_expected_shape() {
        let store = InMemoryStore::new();
        let options = SeedOptions {
            record_count: 3,
            rng_seed: Some(7),
        };

        let report = seed(&store, &options).await.unwrap();

        assert_eq!(report.projects, 3);
        assert_eq!(report.members, 9);
        assert_eq!(report.tasks, report.comments);

        let projects = store.list_projects().await.unwrap();
        assert_eq!(projects.len(), 3);
        for project in &projects {
            assert_eq!(store.list_members(project.id).await.unwrap().len(), 3);

            let tasks = store.project_tasks(project.id).await.unwrap().unwrap().tasks;
            assert!(tasks.len() >= 3 && tasks.len() <= 3 * MAX_TASKS_PER_MEMBER);
            for task in tasks {
                let comments = store.find_comments(CommentFilter::ByTask(task.id)).await.unwrap();
                assert_eq!(comments.len(), 1);
            }
        }
    }

    #[tokio::test]
    async fn fixed_seed_is_deterministic_and_replaces_old_rows() {
        let store = InMemoryStore::new();
        let options = SeedOptions {
            record_count: 2,
            rng_seed: Some(42),
        };

        let first = seed(&store, &options).await.unwrap();
        let second = seed(&store, &options).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.list_projects().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn zero_records_leaves_store_empty() {
        let store = InMemoryStore::new();
        let report = seed(
            &store,
            &SeedOptions {
                record_count: 0,
                rng_seed: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(report, SeedReport::default());
        assert!(store.list_projects().await.unwrap().is_empty());
    }
}
