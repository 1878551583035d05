use std::error::Error;

use ankaa_db::models::ChangeLogModel;

use super::repo_impl::ChangeLogRepositoryImpl;

impl ChangeLogRepositoryImpl {
    /// Append all rows inside one transaction: the batch lands whole or
    /// not at all. No partial-success shape exists for callers.
    pub(super) async fn create_batch_impl(
        repo: &ChangeLogRepositoryImpl,
        items: Vec<ChangeLogModel>,
    ) -> Result<u64, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(0);
        }

        let count = items.len() as u64;
        let mut tx = repo.pool.begin().await?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO change_log (
                    id, entity_type, entity_id, action, field,
                    old_value, new_value, reason, triggered_by, user_id, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(item.id)
            .bind(item.entity_type)
            .bind(item.entity_id)
            .bind(item.action)
            .bind(item.field.as_ref().map(|s| s.as_str()))
            .bind(&item.old_value)
            .bind(&item.new_value)
            .bind(item.reason.as_ref().map(|s| s.as_str()))
            .bind(item.triggered_by)
            .bind(item.user_id)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(count, "changelog batch appended");
        Ok(count)
    }
}
