use std::error::Error;

use ankaa_api::ApiError;
use ankaa_db::models::{ChangeLogEntityType, ChangeLogModel};
use ankaa_db::repository::{ChangeLogQuery, Page};
use sqlx::Row;
use uuid::Uuid;

use super::repo_impl::ChangeLogRepositoryImpl;
use crate::utils::TryFromRow;

impl ChangeLogRepositoryImpl {
    pub(super) async fn load_for_entity_impl(
        repo: &ChangeLogRepositoryImpl,
        entity_type: ChangeLogEntityType,
        entity_id: Uuid,
        query: ChangeLogQuery,
    ) -> Result<Page<ChangeLogModel>, Box<dyn Error + Send + Sync>> {
        if query.page.limit == 0 {
            return Err(ApiError::invalid_input("page limit must be positive").into());
        }

        // COUNT(*) OVER () rides along on every row, so the page and its
        // total come from one statement and cannot drift apart.
        let sql = if query.include_user {
            r#"
            SELECT cl.id, cl.entity_type, cl.entity_id, cl.action, cl.field,
                   cl.old_value, cl.new_value, cl.reason, cl.triggered_by,
                   cl.user_id, u.name AS user_name, cl.created_at,
                   COUNT(*) OVER () AS total
            FROM change_log cl
            LEFT JOIN users u ON u.id = cl.user_id
            WHERE cl.entity_type = $1 AND cl.entity_id = $2
            ORDER BY cl.created_at DESC, cl.id DESC
            LIMIT $3 OFFSET $4
            "#
        } else {
            r#"
            SELECT cl.id, cl.entity_type, cl.entity_id, cl.action, cl.field,
                   cl.old_value, cl.new_value, cl.reason, cl.triggered_by,
                   cl.user_id, NULL::varchar AS user_name, cl.created_at,
                   COUNT(*) OVER () AS total
            FROM change_log cl
            WHERE cl.entity_type = $1 AND cl.entity_id = $2
            ORDER BY cl.created_at DESC, cl.id DESC
            LIMIT $3 OFFSET $4
            "#
        };

        let rows = sqlx::query(sql)
            .bind(entity_type)
            .bind(entity_id)
            .bind(query.page.limit as i64)
            .bind(query.page.offset as i64)
            .fetch_all(&*repo.pool)
            .await?;

        // An empty page carries no window total (offset past the end, or
        // no rows at all), so fall back to a plain count.
        let total: i64 = match rows.first() {
            Some(row) => row.try_get("total")?,
            None => sqlx::query(
                r#"
                SELECT COUNT(*) AS total
                FROM change_log
                WHERE entity_type = $1 AND entity_id = $2
                "#,
            )
            .bind(entity_type)
            .bind(entity_id)
            .fetch_one(&*repo.pool)
            .await?
            .try_get("total")?,
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ChangeLogModel::try_from_row(&row)?);
        }

        tracing::debug!(
            entity_type = %entity_type,
            entity_id = %entity_id,
            returned = items.len(),
            total,
            "changelog page loaded"
        );

        Ok(Page::new(items, total as usize, query.page))
    }
}
