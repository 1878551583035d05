use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::changelog::ChangeLogEntityType;
use crate::models::identifiable::Identifiable;
use crate::repository::pagination::{Page, PageRequest};

/// Query options for reading an entity's changelog.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeLogQuery {
    pub page: PageRequest,
    /// Join the user table to populate the actor's display name on each row
    pub include_user: bool,
}

impl ChangeLogQuery {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            include_user: false,
        }
    }

    pub fn with_user(mut self) -> Self {
        self.include_user = true;
        self
    }
}

/// Generic repository trait for reading the changelog of one entity.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type that must implement Identifiable
#[async_trait]
pub trait LoadForEntity<DB: Database, T: Identifiable>: Send + Sync {
    /// Load a page of changelog rows for `entity_type` + `entity_id`,
    /// most-recent-first.
    async fn load_for_entity(
        &self,
        entity_type: ChangeLogEntityType,
        entity_id: Uuid,
        query: ChangeLogQuery,
    ) -> Result<Page<T>, Box<dyn std::error::Error + Send + Sync>>;
}
