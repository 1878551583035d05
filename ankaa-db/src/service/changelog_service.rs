use std::marker::PhantomData;
use std::sync::Arc;

use ankaa_api::ApiError;
use serde_json::Value;
use sqlx::Database;
use uuid::Uuid;

use crate::diff::validate_field_subset;
use crate::models::{ChangeLogAction, ChangeLogEntityType, ChangeLogModel, ChangeTriggeredBy};
use crate::repository::{ChangeLogQuery, Create, CreateBatch, LoadForEntity, Page};

/// A changelog row as supplied by a caller, before ids and timestamps are
/// assigned. Enum fields are already typed, so unrecognized action or
/// trigger tags have been rejected at deserialization.
#[derive(Debug, Clone)]
pub struct NewChangeLog {
    pub entity_type: ChangeLogEntityType,
    pub entity_id: Uuid,
    pub action: ChangeLogAction,
    pub field: Option<String>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub reason: Option<String>,
    pub triggered_by: ChangeTriggeredBy,
    pub user_id: Option<Uuid>,
}

/// Generic changelog store front: builds rows from caller input and appends
/// them through the repository traits. Shared by every entity adapter.
pub struct ChangelogService<DB: Database, R> {
    repo: Arc<R>,
    _db: PhantomData<DB>,
}

impl<DB, R> ChangelogService<DB, R>
where
    DB: Database,
    R: Create<DB, ChangeLogModel>
        + CreateBatch<DB, ChangeLogModel>
        + LoadForEntity<DB, ChangeLogModel>,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            _db: PhantomData,
        }
    }

    /// Append one changelog row.
    ///
    /// Field-level actions must name the changed field; a whole-entity
    /// action with a field name is equally malformed. Create rows must
    /// carry a non-empty field subset in `new_value`, delete rows in
    /// `old_value`.
    pub async fn create_change_log(
        &self,
        entry: NewChangeLog,
    ) -> Result<ChangeLogModel, Box<dyn std::error::Error + Send + Sync>> {
        if entry.action.is_field_level() && entry.field.is_none() {
            return Err(ApiError::invalid_input(format!(
                "{} changelog entries must name the changed field",
                entry.action
            ))
            .into());
        }
        if !entry.action.is_field_level() && entry.field.is_some() {
            return Err(ApiError::invalid_input(format!(
                "{} is a whole-entity action and carries no field name",
                entry.action
            ))
            .into());
        }
        match entry.action {
            ChangeLogAction::Create | ChangeLogAction::BatchCreate => {
                validate_field_subset(entry.new_value.as_ref().unwrap_or(&Value::Null))?;
            }
            ChangeLogAction::Delete | ChangeLogAction::BatchDelete => {
                validate_field_subset(entry.old_value.as_ref().unwrap_or(&Value::Null))?;
            }
            _ => {}
        }

        let mut row = match entry.field {
            Some(field) => ChangeLogModel::field_level(
                entry.entity_type,
                entry.entity_id,
                entry.action,
                &field,
                entry.old_value,
                entry.new_value,
                entry.user_id,
                entry.triggered_by,
            ),
            None => ChangeLogModel::whole_entity(
                entry.entity_type,
                entry.entity_id,
                entry.action,
                entry.old_value,
                entry.new_value,
                entry.user_id,
                entry.triggered_by,
            ),
        };
        if let Some(reason) = entry.reason {
            row = row.with_reason(&reason);
        }

        self.repo.create(row).await
    }

    /// Append many rows in one all-or-nothing store call; returns the count.
    pub async fn create_many_change_logs(
        &self,
        rows: Vec<ChangeLogModel>,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        if rows.is_empty() {
            return Ok(0);
        }
        self.repo.create_batch(rows).await
    }

    /// Read one entity's changelog, most-recent-first.
    pub async fn get_change_logs(
        &self,
        entity_type: ChangeLogEntityType,
        entity_id: Uuid,
        query: ChangeLogQuery,
    ) -> Result<Page<ChangeLogModel>, Box<dyn std::error::Error + Send + Sync>> {
        self.repo.load_for_entity(entity_type, entity_id, query).await
    }
}
