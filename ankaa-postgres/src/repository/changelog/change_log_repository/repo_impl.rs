use std::error::Error;
use std::sync::Arc;

use ankaa_db::models::{ChangeLogEntityType, ChangeLogModel};
use ankaa_db::repository::{
    ChangeLogQuery, Create, CreateBatch, LoadBatch, LoadForEntity, Page,
};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row};
use uuid::Uuid;

use crate::utils::{get_optional_heapless_string, TryFromRow};

pub struct ChangeLogRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl ChangeLogRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ChangeLogModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ChangeLogModel {
            id: row.try_get("id")?,
            entity_type: row.try_get("entity_type")?,
            entity_id: row.try_get("entity_id")?,
            action: row.try_get("action")?,
            field: get_optional_heapless_string(row, "field")?,
            old_value: row.try_get::<Option<Value>, _>("old_value")?,
            new_value: row.try_get::<Option<Value>, _>("new_value")?,
            reason: get_optional_heapless_string(row, "reason")?,
            triggered_by: row.try_get("triggered_by")?,
            user_id: row.try_get("user_id")?,
            user_name: get_optional_heapless_string(row, "user_name")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl Create<Postgres, ChangeLogModel> for ChangeLogRepositoryImpl {
    async fn create(
        &self,
        item: ChangeLogModel,
    ) -> Result<ChangeLogModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, item).await
    }
}

#[async_trait]
impl CreateBatch<Postgres, ChangeLogModel> for ChangeLogRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ChangeLogModel>,
    ) -> Result<u64, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[async_trait]
impl LoadBatch<Postgres, ChangeLogModel> for ChangeLogRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ChangeLogModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl LoadForEntity<Postgres, ChangeLogModel> for ChangeLogRepositoryImpl {
    async fn load_for_entity(
        &self,
        entity_type: ChangeLogEntityType,
        entity_id: Uuid,
        query: ChangeLogQuery,
    ) -> Result<Page<ChangeLogModel>, Box<dyn Error + Send + Sync>> {
        Self::load_for_entity_impl(self, entity_type, entity_id, query).await
    }
}
