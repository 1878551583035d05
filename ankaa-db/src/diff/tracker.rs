use std::collections::BTreeSet;

use ankaa_api::{ApiError, ApiResult};
use serde_json::{Map, Value};

use super::config::FieldDiffConfig;
use super::equality::values_equal;
use super::flatten::flatten_relation;

/// Compute the minimal partial-update payload between an original snapshot
/// and the live state of an edited form.
///
/// Runs the same equality rules and the same per-entity config as
/// [`super::engine::diff_snapshots`], so a payload the form layer submits
/// and the audit diff recorded for it agree on what constitutes "a change".
/// Relation equality is tested on flattened projections (placeholder
/// elements dropped), but the emitted payload carries the raw current
/// value, since the update endpoint needs the actual data. Keys are taken
/// from both sides: a field present in the snapshot but dropped from the
/// form state submits as `Null`, which clears it server-side.
///
/// Pure: neither input is mutated.
pub fn dirty_fields(
    original: &Value,
    current: &Value,
    config: &FieldDiffConfig,
) -> ApiResult<Map<String, Value>> {
    let original = original.as_object().ok_or_else(|| {
        ApiError::invalid_input("original form snapshot must be an object")
    })?;
    let current = current.as_object().ok_or_else(|| {
        ApiError::invalid_input("current form state must be an object")
    })?;

    static NULL: Value = Value::Null;

    let keys: BTreeSet<&String> = original.keys().chain(current.keys()).collect();

    let mut payload = Map::new();
    for key in keys {
        if config.is_ignored(key.as_str()) {
            continue;
        }
        let old = original.get(key).unwrap_or(&NULL);
        let new = current.get(key).unwrap_or(&NULL);

        let changed = if let Some(handler) = config.relation_handler(key) {
            flatten_relation(handler, old)? != flatten_relation(handler, new)?
        } else {
            !values_equal(config.kind_for(key, old, new), old, new)
        };

        if changed {
            payload.insert(key.clone(), new.clone());
        }
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::equality::FieldKind;
    use crate::diff::flatten::RelationHandler;
    use serde_json::json;

    fn form_config() -> FieldDiffConfig {
        FieldDiffConfig::new()
            .ignore(&["id"])
            .kind("term", FieldKind::Date)
            .relation(
                "services",
                RelationHandler::array(&["description", "status"])
                    .order_sensitive()
                    .requiring(&["description"]),
            )
    }

    #[test]
    fn untouched_forms_submit_nothing() {
        let snapshot = json!({"name": "Hilux", "status": "PENDING"});
        let payload = dirty_fields(&snapshot, &snapshot, &form_config()).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn only_edited_fields_enter_the_payload() {
        let original = json!({"name": "Old", "status": "PENDING", "term": "2024-01-01T00:00:00Z"});
        let current = json!({"name": "New", "status": "PENDING", "term": "2024-01-01T00:00:00.000Z"});
        let payload = dirty_fields(&original, &current, &form_config()).unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("name"), Some(&json!("New")));
    }

    #[test]
    fn clearing_a_field_to_empty_string_is_not_a_change_from_null() {
        let original = json!({"note": null});
        let current = json!({"note": ""});
        let payload = dirty_fields(&original, &current, &form_config()).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn fields_dropped_from_the_form_submit_as_null() {
        let original = json!({"name": "Hilux", "note": "rush job"});
        let current = json!({"name": "Hilux"});
        let payload = dirty_fields(&original, &current, &form_config()).unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("note"), Some(&Value::Null));

        // a dropped key that held no value never registers
        let original = json!({"name": "Hilux", "note": ""});
        let payload = dirty_fields(&original, &current, &form_config()).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn service_reordering_is_submitted() {
        let original = json!({"services": [
            {"description": "sand", "status": "PENDING"},
            {"description": "paint", "status": "PENDING"}
        ]});
        let current = json!({"services": [
            {"description": "paint", "status": "PENDING"},
            {"description": "sand", "status": "PENDING"}
        ]});
        let payload = dirty_fields(&original, &current, &form_config()).unwrap();
        assert_eq!(payload.get("services"), current.get("services"));
    }

    #[test]
    fn incomplete_service_rows_do_not_dirty_the_form() {
        let original = json!({"services": [
            {"description": "sand", "status": "PENDING"}
        ]});
        // the form appends an empty row the user never filled in
        let current = json!({"services": [
            {"description": "sand", "status": "PENDING"},
            {"description": "", "status": "PENDING"}
        ]});
        let payload = dirty_fields(&original, &current, &form_config()).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let original = json!({"name": "Old"});
        let current = json!({"name": "New"});
        let before_call = original.clone();
        let _ = dirty_fields(&original, &current, &form_config()).unwrap();
        assert_eq!(original, before_call);
    }

    #[test]
    fn non_object_form_state_is_invalid() {
        assert!(dirty_fields(&json!([]), &json!({}), &form_config()).is_err());
    }
}
