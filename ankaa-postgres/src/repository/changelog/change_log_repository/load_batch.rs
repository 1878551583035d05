use std::collections::HashMap;
use std::error::Error;

use ankaa_db::models::ChangeLogModel;
use uuid::Uuid;

use super::repo_impl::ChangeLogRepositoryImpl;
use crate::utils::TryFromRow;

impl ChangeLogRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ChangeLogRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ChangeLogModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT id, entity_type, entity_id, action, field,
                   old_value, new_value, reason, triggered_by, user_id,
                   NULL::varchar AS user_name, created_at
            FROM change_log
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&*repo.pool)
        .await?;

        let mut item_map = HashMap::new();
        for row in rows {
            let item = ChangeLogModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        // same order as the input ids
        let mut result = Vec::with_capacity(ids.len());
        for id in ids {
            result.push(item_map.remove(id));
        }
        Ok(result)
    }
}
