use std::sync::Arc;

use sqlx::PgPool;

use super::change_log_repository::ChangeLogRepositoryImpl;

/// Factory for changelog module repositories.
///
/// Meant to be held as a singleton; repositories themselves are cheap
/// handles over the shared pool.
#[derive(Default)]
pub struct ChangelogRepoFactory {}

impl ChangelogRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_change_log_repo(&self, pool: Arc<PgPool>) -> Arc<ChangeLogRepositoryImpl> {
        Arc::new(ChangeLogRepositoryImpl::new(pool))
    }

    pub fn build_all_repos(&self, pool: Arc<PgPool>) -> ChangelogRepositories {
        ChangelogRepositories {
            change_log_repository: self.build_change_log_repo(pool),
        }
    }
}

/// Container for all changelog module repositories.
pub struct ChangelogRepositories {
    pub change_log_repository: Arc<ChangeLogRepositoryImpl>,
}
