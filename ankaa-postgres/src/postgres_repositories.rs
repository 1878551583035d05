use std::sync::Arc;

use ankaa_db::service::{ChangelogService, TaskChangelogService};
use sqlx::{PgPool, Postgres};

use crate::repository::changelog::{ChangelogRepoFactory, ChangelogRepositories};
use crate::repository::changelog::change_log_repository::ChangeLogRepositoryImpl;

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
    changelog_factory: Arc<ChangelogRepoFactory>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            changelog_factory: ChangelogRepoFactory::new(),
        }
    }

    pub fn create_changelog_repositories(&self) -> ChangelogRepositories {
        self.changelog_factory.build_all_repos(self.pool.clone())
    }

    /// Generic changelog store front over the Postgres repository.
    pub fn changelog_service(&self) -> ChangelogService<Postgres, ChangeLogRepositoryImpl> {
        let repo = self.changelog_factory.build_change_log_repo(self.pool.clone());
        ChangelogService::new(repo)
    }

    /// Task-specific changelog entry points over the Postgres repository.
    pub fn task_changelog_service(&self) -> TaskChangelogService<Postgres, ChangeLogRepositoryImpl> {
        let repo = self.changelog_factory.build_change_log_repo(self.pool.clone());
        TaskChangelogService::new(repo)
    }
}
