#[cfg(test)]
pub mod test_utils {
    use ankaa_db::models::{
        ChangeLogAction, ChangeLogEntityType, ChangeLogModel, ChangeTriggeredBy,
    };
    use serde_json::json;
    use uuid::Uuid;

    pub fn new_test_change_log(field: &str) -> ChangeLogModel {
        new_test_change_log_for(Uuid::new_v4(), field)
    }

    pub fn new_test_change_log_for(entity_id: Uuid, field: &str) -> ChangeLogModel {
        ChangeLogModel::field_level(
            ChangeLogEntityType::Task,
            entity_id,
            ChangeLogAction::Update,
            field,
            Some(json!("old")),
            Some(json!("new")),
            None,
            ChangeTriggeredBy::System,
        )
    }
}
