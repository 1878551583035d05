use ankaa_api::{ApiError, ApiResult};
use serde_json::{Map, Value};

/// How a relation field is reduced to a comparable projection.
///
/// Raw related records carry volatile fields (timestamps, nested
/// sub-relations) that must not participate in equality, so each relation
/// declares the closed set of fields that do. Closed tagged variants,
/// resolved through the per-entity config at adapter construction time.
#[derive(Debug, Clone)]
pub enum RelationHandler {
    /// A to-many relation.
    Array {
        /// Fields kept in each element's projection
        simplify_fields: Vec<String>,
        /// Group elements by this key before comparing, so reordering
        /// within a group is not a change
        group_by: Option<String>,
        /// When set, element order is part of the value
        order_sensitive: bool,
        /// Elements missing any of these (or carrying "no value" there)
        /// are incomplete placeholders and are dropped before projection
        required_fields: Vec<String>,
    },
    /// A to-one relation: at most one related instance.
    Object {
        simplify_fields: Vec<String>,
    },
}

impl RelationHandler {
    pub fn array(simplify_fields: &[&str]) -> Self {
        RelationHandler::Array {
            simplify_fields: simplify_fields.iter().map(|s| s.to_string()).collect(),
            group_by: None,
            order_sensitive: false,
            required_fields: Vec::new(),
        }
    }

    pub fn object(simplify_fields: &[&str]) -> Self {
        RelationHandler::Object {
            simplify_fields: simplify_fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn grouped_by(mut self, key: &str) -> Self {
        if let RelationHandler::Array { group_by, .. } = &mut self {
            *group_by = Some(key.to_string());
        }
        self
    }

    pub fn order_sensitive(mut self) -> Self {
        if let RelationHandler::Array { order_sensitive, .. } = &mut self {
            *order_sensitive = true;
        }
        self
    }

    pub fn requiring(mut self, fields: &[&str]) -> Self {
        if let RelationHandler::Array { required_fields, .. } = &mut self {
            *required_fields = fields.iter().map(|s| s.to_string()).collect();
        }
        self
    }
}

fn project(element: &Map<String, Value>, simplify_fields: &[String]) -> Value {
    let mut out = Map::new();
    for field in simplify_fields {
        if let Some(v) = element.get(field) {
            if !v.is_null() {
                out.insert(field.clone(), v.clone());
            }
        }
    }
    Value::Object(out)
}

fn is_placeholder(element: &Map<String, Value>, required_fields: &[String]) -> bool {
    required_fields.iter().any(|field| {
        element
            .get(field)
            .map(super::equality::is_no_value)
            .unwrap_or(true)
    })
}

fn canonical_sort(items: &mut [Value]) {
    items.sort_by_cached_key(|v| v.to_string());
}

/// Reduce a relation value to its comparable projection.
///
/// An absent relation, `null`, and `[]` all flatten to `Null` ("no related
/// items"), so an ORM returning an empty array versus omitting the relation
/// entirely never registers as a change.
pub fn flatten_relation(handler: &RelationHandler, value: &Value) -> ApiResult<Value> {
    match handler {
        RelationHandler::Array {
            simplify_fields,
            group_by,
            order_sensitive,
            required_fields,
        } => {
            let items = match value {
                Value::Null => return Ok(Value::Null),
                Value::Array(items) => items,
                other => {
                    return Err(ApiError::invalid_input(format!(
                        "expected an array relation, got {other}"
                    )))
                }
            };

            let mut projections: Vec<Value> = Vec::with_capacity(items.len());
            for item in items {
                let element = item.as_object().ok_or_else(|| {
                    ApiError::invalid_input("array relation elements must be objects")
                })?;
                if is_placeholder(element, required_fields) {
                    continue;
                }
                projections.push(project(element, simplify_fields));
            }

            if projections.is_empty() {
                return Ok(Value::Null);
            }

            if let Some(key) = group_by {
                let mut groups: Map<String, Value> = Map::new();
                for projection in projections {
                    let group = projection
                        .get(key)
                        .map(|v| match v {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .unwrap_or_default();
                    match groups.entry(group).or_insert_with(|| Value::Array(vec![])) {
                        Value::Array(bucket) => bucket.push(projection),
                        _ => unreachable!(),
                    }
                }
                // order within a group is never a change
                for bucket in groups.values_mut() {
                    if let Value::Array(items) = bucket {
                        canonical_sort(items);
                    }
                }
                Ok(Value::Object(groups))
            } else {
                let mut projections = projections;
                if !order_sensitive {
                    canonical_sort(&mut projections);
                }
                Ok(Value::Array(projections))
            }
        }
        RelationHandler::Object { simplify_fields } => match value {
            Value::Null => Ok(Value::Null),
            Value::Object(element) => Ok(project(element, simplify_fields)),
            other => Err(ApiError::invalid_input(format!(
                "expected an object relation, got {other}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn volatile_fields_are_stripped_from_projections() {
        let handler = RelationHandler::array(&["id", "type", "quantity"]);
        let before = json!([{"id": 1, "type": "A", "quantity": 5, "updated_at": "t1"}]);
        let after = json!([{"id": 1, "type": "A", "quantity": 5, "updated_at": "t2"}]);
        assert_eq!(
            flatten_relation(&handler, &before).unwrap(),
            flatten_relation(&handler, &after).unwrap()
        );
    }

    #[test]
    fn empty_array_and_null_both_flatten_to_null() {
        let handler = RelationHandler::array(&["id"]);
        assert_eq!(flatten_relation(&handler, &json!([])).unwrap(), Value::Null);
        assert_eq!(flatten_relation(&handler, &Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn grouping_makes_reordering_within_a_group_invisible() {
        let handler = RelationHandler::array(&["type", "quantity"]).grouped_by("type");
        let before = json!([
            {"type": "A", "quantity": 1},
            {"type": "A", "quantity": 2},
            {"type": "B", "quantity": 3}
        ]);
        let after = json!([
            {"type": "B", "quantity": 3},
            {"type": "A", "quantity": 2},
            {"type": "A", "quantity": 1}
        ]);
        assert_eq!(
            flatten_relation(&handler, &before).unwrap(),
            flatten_relation(&handler, &after).unwrap()
        );
    }

    #[test]
    fn order_sensitive_arrays_keep_their_order() {
        let handler =
            RelationHandler::array(&["description"]).order_sensitive();
        let before = json!([{"description": "a"}, {"description": "b"}]);
        let after = json!([{"description": "b"}, {"description": "a"}]);
        assert_ne!(
            flatten_relation(&handler, &before).unwrap(),
            flatten_relation(&handler, &after).unwrap()
        );
    }

    #[test]
    fn placeholder_elements_are_dropped() {
        let handler = RelationHandler::array(&["description", "status"])
            .order_sensitive()
            .requiring(&["description"]);
        let with_placeholder = json!([
            {"description": "paint hood", "status": "PENDING"},
            {"description": "", "status": "PENDING"}
        ]);
        let without = json!([{"description": "paint hood", "status": "PENDING"}]);
        assert_eq!(
            flatten_relation(&handler, &with_placeholder).unwrap(),
            flatten_relation(&handler, &without).unwrap()
        );
    }

    #[test]
    fn object_relation_presence_is_a_change() {
        let handler = RelationHandler::object(&["id", "plate"]);
        let populated = json!({"id": 7, "plate": "ABC-1234", "updated_at": "x"});
        assert_eq!(
            flatten_relation(&handler, &populated).unwrap(),
            json!({"id": 7, "plate": "ABC-1234"})
        );
        assert_eq!(flatten_relation(&handler, &Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn non_array_input_for_an_array_relation_is_invalid() {
        let handler = RelationHandler::array(&["id"]);
        assert!(flatten_relation(&handler, &json!("oops")).is_err());
    }
}
