use std::error::Error;

use ankaa_db::models::ChangeLogModel;

use super::repo_impl::ChangeLogRepositoryImpl;

impl ChangeLogRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &ChangeLogRepositoryImpl,
        item: ChangeLogModel,
    ) -> Result<ChangeLogModel, Box<dyn Error + Send + Sync>> {
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
        .execute(&*repo.pool)
        .await?;

        tracing::debug!(
            entity_type = %item.entity_type,
            entity_id = %item.entity_id,
            action = %item.action,
            "changelog row appended"
        );

        Ok(item)
    }
}
