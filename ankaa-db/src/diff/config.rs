use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::equality::FieldKind;
use super::flatten::RelationHandler;

/// Static per-entity diff configuration.
///
/// Built once at adapter construction and consulted on every diff: which
/// fields never participate (auto-managed columns, relation keys handled
/// separately), which fields are relations and how they flatten, and
/// explicit equality kinds for fields whose runtime shape is ambiguous.
#[derive(Debug, Clone, Default)]
pub struct FieldDiffConfig {
    fields_to_ignore: HashSet<String>,
    relation_handlers: HashMap<String, RelationHandler>,
    field_kinds: HashMap<String, FieldKind>,
}

impl FieldDiffConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, fields: &[&str]) -> Self {
        self.fields_to_ignore
            .extend(fields.iter().map(|s| s.to_string()));
        self
    }

    pub fn relation(mut self, field: &str, handler: RelationHandler) -> Self {
        self.relation_handlers.insert(field.to_string(), handler);
        self
    }

    pub fn kind(mut self, field: &str, kind: FieldKind) -> Self {
        self.field_kinds.insert(field.to_string(), kind);
        self
    }

    pub fn is_ignored(&self, field: &str) -> bool {
        self.fields_to_ignore.contains(field)
    }

    pub fn relation_handler(&self, field: &str) -> Option<&RelationHandler> {
        self.relation_handlers.get(field)
    }

    /// Resolve the equality kind for a scalar field: the configured hint,
    /// or shape inference when none was declared.
    pub fn kind_for(&self, field: &str, before: &Value, after: &Value) -> FieldKind {
        self.field_kinds
            .get(field)
            .copied()
            .unwrap_or_else(|| FieldKind::infer(before, after))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn configured_kind_overrides_inference() {
        let config = FieldDiffConfig::new().kind("services", FieldKind::OrderedList);
        let a = json!(["a", "b"]);
        let b = json!(["b", "a"]);
        // inference would say UnorderedList for primitive arrays
        assert_eq!(config.kind_for("services", &a, &b), FieldKind::OrderedList);
        assert_eq!(config.kind_for("paint_ids", &a, &b), FieldKind::UnorderedList);
    }

    #[test]
    fn ignored_fields_and_relations_are_looked_up_by_name() {
        let config = FieldDiffConfig::new()
            .ignore(&["id", "created_at"])
            .relation("cuts", RelationHandler::array(&["type"]));
        assert!(config.is_ignored("id"));
        assert!(!config.is_ignored("name"));
        assert!(config.relation_handler("cuts").is_some());
        assert!(config.relation_handler("name").is_none());
    }
}
