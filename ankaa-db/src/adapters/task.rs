use ankaa_api::ApiResult;
use serde_json::Value;
use uuid::Uuid;

use crate::diff::{
    validate_field_subset, FieldChange, FieldDiffConfig, FieldKind, RelationHandler,
};
use crate::models::{ChangeLogAction, ChangeLogEntityType, ChangeLogModel, ChangeTriggeredBy};

/// Diff configuration for the production task entity.
///
/// Auto-managed columns are ignored; every relation the task form can edit
/// is routed through a flattening handler so volatile related-record fields
/// never register as changes. The services list is the one relation where
/// order is part of the value (it is the work sequence shown to painters),
/// and rows the form appended but the user never filled in are dropped
/// before comparison.
pub fn task_diff_config() -> FieldDiffConfig {
    FieldDiffConfig::new()
        .ignore(&["id", "created_at", "updated_at", "status_order"])
        .kind("entry_date", FieldKind::Date)
        .kind("term", FieldKind::Date)
        .kind("started_at", FieldKind::Date)
        .kind("finished_at", FieldKind::Date)
        .kind("paint_ids", FieldKind::UnorderedList)
        .relation(
            "cuts",
            RelationHandler::array(&["id", "type", "quantity"]).grouped_by("type"),
        )
        .relation(
            "services",
            RelationHandler::array(&["description", "status"])
                .order_sensitive()
                .requiring(&["description"]),
        )
        .relation(
            "airbrushings",
            RelationHandler::array(&["id", "status", "price"]),
        )
        .relation("logo_paints", RelationHandler::array(&["id"]))
        .relation("artworks", RelationHandler::array(&["id", "file_name"]))
        .relation("observation", RelationHandler::object(&["id", "description"]))
        .relation("truck", RelationHandler::object(&["id", "plate", "garage_id"]))
}

/// Input for a full before/after diff of one task.
#[derive(Debug, Clone)]
pub struct TaskTrackChangesInput<'a> {
    pub task_id: Uuid,
    pub before: &'a Value,
    pub after: &'a Value,
    pub user_id: Option<Uuid>,
    pub triggered_by: ChangeTriggeredBy,
}

fn default_trigger(user_id: Option<Uuid>) -> ChangeTriggeredBy {
    if user_id.is_some() {
        ChangeTriggeredBy::User
    } else {
        ChangeTriggeredBy::System
    }
}

/// Diff two task snapshots and build one UPDATE row per changed field.
pub fn track_changes(input: TaskTrackChangesInput<'_>) -> ApiResult<Vec<ChangeLogModel>> {
    super::track_entity_changes(
        ChangeLogEntityType::Task,
        input.task_id,
        input.before,
        input.after,
        input.user_id,
        input.triggered_by,
        &task_diff_config(),
    )
}

/// One whole-entity CREATE row carrying a caller-chosen field subset.
pub fn track_creation(
    task_id: Uuid,
    fields: &Value,
    user_id: Option<Uuid>,
) -> ApiResult<ChangeLogModel> {
    validate_field_subset(fields)?;
    Ok(ChangeLogModel::whole_entity(
        ChangeLogEntityType::Task,
        task_id,
        ChangeLogAction::Create,
        None,
        Some(fields.clone()),
        user_id,
        default_trigger(user_id),
    ))
}

/// One whole-entity DELETE row carrying the last known field subset.
pub fn track_deletion(
    task_id: Uuid,
    fields: &Value,
    user_id: Option<Uuid>,
) -> ApiResult<ChangeLogModel> {
    validate_field_subset(fields)?;
    Ok(ChangeLogModel::whole_entity(
        ChangeLogEntityType::Task,
        task_id,
        ChangeLogAction::Delete,
        Some(fields.clone()),
        None,
        user_id,
        default_trigger(user_id),
    ))
}

/// One explicit single-field row, bypassing the diff engine entirely.
/// Used when the caller already knows exactly what changed.
pub fn track_field_change(
    task_id: Uuid,
    field: &str,
    old_value: Option<Value>,
    new_value: Option<Value>,
    user_id: Option<Uuid>,
) -> ChangeLogModel {
    ChangeLogModel::field_level(
        ChangeLogEntityType::Task,
        task_id,
        ChangeLogAction::Update,
        field,
        old_value,
        new_value,
        user_id,
        default_trigger(user_id),
    )
}

/// Multiple explicit single-field rows built together, for persistence in
/// one store call.
pub fn track_batch_field_changes(
    task_id: Uuid,
    changes: Vec<FieldChange>,
    user_id: Option<Uuid>,
    triggered_by: ChangeTriggeredBy,
) -> Vec<ChangeLogModel> {
    changes
        .into_iter()
        .map(|change| {
            ChangeLogModel::field_level(
                ChangeLogEntityType::Task,
                task_id,
                ChangeLogAction::BatchUpdate,
                &change.field,
                change.old_value,
                change.new_value,
                user_id,
                triggered_by,
            )
        })
        .collect()
}
