use std::collections::BTreeSet;

use ankaa_api::{ApiError, ApiResult};
use serde_json::Value;

use super::config::FieldDiffConfig;
use super::equality::values_equal;
use super::flatten::flatten_relation;

/// One field found different between two snapshots of the same entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    /// `None` when the field was absent or null before the change; for
    /// relation fields this is the flattened projection, not the raw value.
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

static NULL: Value = Value::Null;

fn not_null(v: Value) -> Option<Value> {
    match v {
        Value::Null => None,
        other => Some(other),
    }
}

fn as_object<'a>(
    which: &str,
    snapshot: &'a Value,
) -> ApiResult<&'a serde_json::Map<String, Value>> {
    snapshot.as_object().ok_or_else(|| {
        ApiError::invalid_input(format!(
            "{which} snapshot must be an object, got {snapshot}"
        ))
    })
}

/// Compare two snapshots of the same entity and return one [`FieldChange`]
/// per field whose value differs under the configured equality rules.
///
/// Non-object input is a programming error and fails immediately; silently
/// skipping it would produce a misleading empty audit trail.
pub fn diff_snapshots(
    before: &Value,
    after: &Value,
    config: &FieldDiffConfig,
) -> ApiResult<Vec<FieldChange>> {
    let before = as_object("before", before)?;
    let after = as_object("after", after)?;

    // symmetric key union, deterministic order
    let keys: BTreeSet<&str> = before
        .keys()
        .chain(after.keys())
        .map(String::as_str)
        .collect();

    let mut changes = Vec::new();
    for key in keys {
        if config.is_ignored(key) {
            continue;
        }
        let old = before.get(key).unwrap_or(&NULL);
        let new = after.get(key).unwrap_or(&NULL);

        if let Some(handler) = config.relation_handler(key) {
            let old_flat = flatten_relation(handler, old)?;
            let new_flat = flatten_relation(handler, new)?;
            if old_flat != new_flat {
                changes.push(FieldChange {
                    field: key.to_string(),
                    old_value: not_null(old_flat),
                    new_value: not_null(new_flat),
                });
            }
            continue;
        }

        let kind = config.kind_for(key, old, new);
        if !values_equal(kind, old, new) {
            changes.push(FieldChange {
                field: key.to_string(),
                old_value: not_null(old.clone()),
                new_value: not_null(new.clone()),
            });
        }
    }

    Ok(changes)
}

/// Validate the caller-chosen field subset carried by a whole-entity
/// CREATE/DELETE record. An empty subset is invalid input: a record that
/// says "something was created" with no content is useless as audit.
pub fn validate_field_subset(subset: &Value) -> ApiResult<()> {
    match subset.as_object() {
        Some(fields) if !fields.is_empty() => Ok(()),
        Some(_) => Err(ApiError::invalid_input(
            "field subset for a whole-entity record must not be empty",
        )),
        None => Err(ApiError::invalid_input(format!(
            "field subset must be an object, got {subset}"
        ))),
    }
}
