use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

use super::{ChangeLogAction, ChangeLogEntityType, ChangeTriggeredBy};

/// # Documentation
/// One append-only changelog row describing a single field-level or
/// whole-entity change.
/// - Rows are immutable once created; there is no update path.
/// - `entity_type` + `entity_id` identify the audited subject.
/// - For UPDATE actions `field` is always present and `old_value` differs
///   from `new_value` under the diff engine's equality rule.
/// - For CREATE/DELETE actions `field` is `None` and `new_value`/`old_value`
///   carry a caller-chosen field subset of the entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeLogModel {
    pub id: Uuid,

    pub entity_type: ChangeLogEntityType,

    pub entity_id: Uuid,

    pub action: ChangeLogAction,

    /// Name of the changed field, `None` for whole-entity actions
    pub field: Option<HeaplessString<100>>,

    /// Previous value: scalar, array, or simplified relation projection
    pub old_value: Option<Value>,

    /// New value, same shapes as `old_value`
    pub new_value: Option<Value>,

    /// Optional free-text annotation supplied by the caller
    pub reason: Option<HeaplessString<255>>,

    pub triggered_by: ChangeTriggeredBy,

    /// Actor reference; `None` implies a system-triggered change
    pub user_id: Option<Uuid>,

    /// Display name of the actor, populated only by queries that join the
    /// user table (`include_user`). Never written to the changelog table.
    pub user_name: Option<HeaplessString<100>>,

    pub created_at: DateTime<Utc>,
}

impl ChangeLogModel {
    /// Build a field-level row with a fresh id and timestamp.
    ///
    /// Field names longer than the column bound are truncated at the bound
    /// rather than rejected; the audit trail stays useful either way.
    pub fn field_level(
        entity_type: ChangeLogEntityType,
        entity_id: Uuid,
        action: ChangeLogAction,
        field: &str,
        old_value: Option<Value>,
        new_value: Option<Value>,
        user_id: Option<Uuid>,
        triggered_by: ChangeTriggeredBy,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_type,
            entity_id,
            action,
            field: Some(truncated(field)),
            old_value,
            new_value,
            reason: None,
            triggered_by,
            user_id,
            user_name: None,
            created_at: Utc::now(),
        }
    }

    /// Build a whole-entity row (CREATE/DELETE/ARCHIVE/RESTORE).
    pub fn whole_entity(
        entity_type: ChangeLogEntityType,
        entity_id: Uuid,
        action: ChangeLogAction,
        old_value: Option<Value>,
        new_value: Option<Value>,
        user_id: Option<Uuid>,
        triggered_by: ChangeTriggeredBy,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_type,
            entity_id,
            action,
            field: None,
            old_value,
            new_value,
            reason: None,
            triggered_by,
            user_id,
            user_name: None,
            created_at: Utc::now(),
        }
    }
}

impl ChangeLogModel {
    /// Attach a free-text annotation, truncated at the column bound.
    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(truncated(reason));
        self
    }
}

fn truncated<const N: usize>(s: &str) -> HeaplessString<N> {
    match HeaplessString::try_from(s) {
        Ok(hs) => hs,
        Err(_) => {
            let mut end = N;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            HeaplessString::try_from(&s[..end]).unwrap_or_default()
        }
    }
}

impl Identifiable for ChangeLogModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_level_rows_carry_the_field_name() {
        let row = ChangeLogModel::field_level(
            ChangeLogEntityType::Task,
            Uuid::new_v4(),
            ChangeLogAction::Update,
            "status",
            Some(Value::from("PENDING")),
            Some(Value::from("IN_PRODUCTION")),
            None,
            ChangeTriggeredBy::System,
        );
        assert_eq!(row.field.as_ref().unwrap().as_str(), "status");
        assert!(row.user_id.is_none());
    }

    #[test]
    fn overlong_field_names_are_truncated_not_dropped() {
        let long = "f".repeat(300);
        let row = ChangeLogModel::field_level(
            ChangeLogEntityType::Task,
            Uuid::new_v4(),
            ChangeLogAction::Update,
            &long,
            None,
            Some(Value::from(1)),
            None,
            ChangeTriggeredBy::System,
        );
        assert_eq!(row.field.as_ref().unwrap().len(), 100);
    }
}
