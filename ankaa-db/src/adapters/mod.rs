pub mod task;

// Re-exports
pub use task::*;

use ankaa_api::ApiResult;
use serde_json::Value;
use uuid::Uuid;

use crate::diff::{diff_snapshots, FieldDiffConfig};
use crate::models::{ChangeLogAction, ChangeLogEntityType, ChangeLogModel, ChangeTriggeredBy};

/// Generic before/after tracking: diff two snapshots of any entity under
/// the supplied config and build one UPDATE row per changed field.
///
/// Entity adapters wrap this with their own [`FieldDiffConfig`]; callers
/// with a one-off config can use it directly.
pub fn track_entity_changes(
    entity_type: ChangeLogEntityType,
    entity_id: Uuid,
    before: &Value,
    after: &Value,
    user_id: Option<Uuid>,
    triggered_by: ChangeTriggeredBy,
    config: &FieldDiffConfig,
) -> ApiResult<Vec<ChangeLogModel>> {
    let changes = diff_snapshots(before, after, config)?;
    Ok(changes
        .into_iter()
        .map(|change| {
            ChangeLogModel::field_level(
                entity_type,
                entity_id,
                ChangeLogAction::Update,
                &change.field,
                change.old_value,
                change.new_value,
                user_id,
                triggered_by,
            )
        })
        .collect())
}
