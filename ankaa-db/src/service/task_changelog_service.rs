use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use sqlx::Database;
use uuid::Uuid;

use crate::adapters::task;
use crate::adapters::task::TaskTrackChangesInput;
use crate::diff::FieldChange;
use crate::models::{ChangeLogModel, ChangeTriggeredBy};
use crate::repository::{Create, CreateBatch};

/// Task changelog entry points: diff or accept explicit field changes,
/// then persist the produced rows in one store call.
///
/// Callers are expected not to abort the task mutation they are auditing
/// when one of these calls fails; that decision sits with them, since this
/// service has no visibility into the surrounding transaction.
pub struct TaskChangelogService<DB: Database, R> {
    repo: Arc<R>,
    _db: PhantomData<DB>,
}

impl<DB, R> TaskChangelogService<DB, R>
where
    DB: Database,
    R: Create<DB, ChangeLogModel> + CreateBatch<DB, ChangeLogModel>,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            _db: PhantomData,
        }
    }

    /// Diff two task snapshots, persist one UPDATE row per changed field,
    /// and return the rows. An empty diff writes nothing.
    pub async fn track_changes(
        &self,
        input: TaskTrackChangesInput<'_>,
    ) -> Result<Vec<ChangeLogModel>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = task::track_changes(input)?;
        if rows.is_empty() {
            return Ok(rows);
        }
        self.repo.create_batch(rows.clone()).await?;
        Ok(rows)
    }

    pub async fn track_creation(
        &self,
        task_id: Uuid,
        fields: &Value,
        user_id: Option<Uuid>,
    ) -> Result<ChangeLogModel, Box<dyn std::error::Error + Send + Sync>> {
        let row = task::track_creation(task_id, fields, user_id)?;
        self.repo.create(row).await
    }

    pub async fn track_deletion(
        &self,
        task_id: Uuid,
        fields: &Value,
        user_id: Option<Uuid>,
    ) -> Result<ChangeLogModel, Box<dyn std::error::Error + Send + Sync>> {
        let row = task::track_deletion(task_id, fields, user_id)?;
        self.repo.create(row).await
    }

    /// Record a single known field change without running the diff engine.
    pub async fn track_field_change(
        &self,
        task_id: Uuid,
        field: &str,
        old_value: Option<Value>,
        new_value: Option<Value>,
        user_id: Option<Uuid>,
    ) -> Result<ChangeLogModel, Box<dyn std::error::Error + Send + Sync>> {
        let row = task::track_field_change(task_id, field, old_value, new_value, user_id);
        self.repo.create(row).await
    }

    /// Record several known field changes, persisted together.
    pub async fn track_batch_field_changes(
        &self,
        task_id: Uuid,
        changes: Vec<FieldChange>,
        user_id: Option<Uuid>,
        triggered_by: ChangeTriggeredBy,
    ) -> Result<Vec<ChangeLogModel>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = task::track_batch_field_changes(task_id, changes, user_id, triggered_by);
        if rows.is_empty() {
            return Ok(rows);
        }
        self.repo.create_batch(rows.clone()).await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChangeLogAction, ChangeLogEntityType};
    use crate::service::testing::MemoryStore;
    use serde_json::json;
    use sqlx::Postgres;

    fn service(store: Arc<MemoryStore>) -> TaskChangelogService<Postgres, MemoryStore> {
        TaskChangelogService::new(store)
    }

    #[tokio::test]
    async fn tracked_changes_end_up_in_the_store() {
        let store = Arc::new(MemoryStore::default());
        let svc = service(store.clone());
        let task_id = Uuid::new_v4();

        let rows = svc
            .track_changes(TaskTrackChangesInput {
                task_id,
                before: &json!({"name": "Old", "status": "PENDING"}),
                after: &json!({"name": "New", "status": "PENDING"}),
                user_id: None,
                triggered_by: ChangeTriggeredBy::System,
            })
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entity_type, ChangeLogEntityType::Task);
        assert_eq!(rows[0].field.as_ref().unwrap().as_str(), "name");
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_diffs_touch_the_store_not_at_all() {
        let store = Arc::new(MemoryStore {
            fail_writes: true,
            ..Default::default()
        });
        let svc = service(store);
        let snapshot = json!({"name": "Same"});
        // would fail if it reached the store
        let rows = svc
            .track_changes(TaskTrackChangesInput {
                task_id: Uuid::new_v4(),
                before: &snapshot,
                after: &snapshot,
                user_id: None,
                triggered_by: ChangeTriggeredBy::System,
            })
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn single_field_tracking_persists_one_row() {
        let store = Arc::new(MemoryStore::default());
        let svc = service(store.clone());
        let user_id = Uuid::new_v4();

        let row = svc
            .track_field_change(
                Uuid::new_v4(),
                "status",
                Some(json!("PENDING")),
                Some(json!("IN_PRODUCTION")),
                Some(user_id),
            )
            .await
            .unwrap();

        assert_eq!(row.action, ChangeLogAction::Update);
        assert_eq!(row.user_id, Some(user_id));
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn creation_and_deletion_are_whole_entity_rows() {
        let store = Arc::new(MemoryStore::default());
        let svc = service(store.clone());
        let task_id = Uuid::new_v4();

        let created = svc
            .track_creation(task_id, &json!({"name": "T"}), None)
            .await
            .unwrap();
        let deleted = svc
            .track_deletion(task_id, &json!({"name": "T"}), None)
            .await
            .unwrap();

        assert_eq!(created.action, ChangeLogAction::Create);
        assert_eq!(deleted.action, ChangeLogAction::Delete);
        assert!(created.field.is_none() && deleted.field.is_none());
        assert_eq!(store.rows.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn batch_field_changes_are_persisted_together() {
        let store = Arc::new(MemoryStore::default());
        let svc = service(store.clone());

        let rows = svc
            .track_batch_field_changes(
                Uuid::new_v4(),
                vec![
                    FieldChange {
                        field: "status".into(),
                        old_value: Some(json!("PENDING")),
                        new_value: Some(json!("ON_HOLD")),
                    },
                    FieldChange {
                        field: "term".into(),
                        old_value: None,
                        new_value: Some(json!("2024-06-01T00:00:00Z")),
                    },
                ],
                None,
                ChangeTriggeredBy::Automation,
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(store.rows.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn store_failure_reaches_the_caller_unwrapped() {
        let store = Arc::new(MemoryStore {
            fail_writes: true,
            ..Default::default()
        });
        let svc = service(store);
        let err = svc
            .track_creation(Uuid::new_v4(), &json!({"name": "T"}), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "storage unavailable");
    }
}
