use chrono::DateTime;
use serde_json::Value;

/// Explicit equality hint for a field.
///
/// The server diff engine and the dirty-field tracker both resolve a field's
/// kind through [`crate::diff::config::FieldDiffConfig`], so the two call
/// sites can never drift apart on what counts as "a change". Fields without
/// a configured kind fall back to shape inference ([`FieldKind::infer`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Strict value comparison; numeric zero is distinct from absence,
    /// and `0 != "0"`.
    Scalar,
    /// Compared by millisecond timestamp; either side may be an RFC 3339
    /// string or a serialized datetime.
    Date,
    /// Element order matters: `[A, B]` differs from `[B, A]`.
    OrderedList,
    /// Multiset comparison: `["x", "y"]` equals `["y", "x"]`.
    UnorderedList,
    /// Deep structural comparison of object shapes.
    Object,
}

impl FieldKind {
    /// Fallback when no explicit kind is configured for a field.
    pub fn infer(a: &Value, b: &Value) -> FieldKind {
        let sample = if a.is_null() { b } else { a };
        match sample {
            Value::Array(items) => {
                if !items.is_empty() && items.iter().all(|v| !v.is_object() && !v.is_array()) {
                    FieldKind::UnorderedList
                } else {
                    FieldKind::OrderedList
                }
            }
            Value::Object(_) => FieldKind::Object,
            Value::String(s) if parse_millis(s).is_some() => FieldKind::Date,
            _ => FieldKind::Scalar,
        }
    }
}

/// True when a value carries no information: JSON null, a missing key
/// (callers substitute `Null`), or an empty string.
pub fn is_no_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn is_empty_list(v: &Value) -> bool {
    matches!(v, Value::Array(items) if items.is_empty())
}

fn parse_millis(s: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

fn as_millis(v: &Value) -> Option<i64> {
    match v {
        Value::String(s) => parse_millis(s),
        _ => None,
    }
}

fn canonical(v: &Value) -> String {
    // serde_json maps are sorted by key, so this is a stable representation
    v.to_string()
}

fn multisets_equal(a: &[Value], b: &[Value]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut left: Vec<String> = a.iter().map(canonical).collect();
    let mut right: Vec<String> = b.iter().map(canonical).collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

/// Type-aware equality shared by the diff engine and the dirty-field tracker.
///
/// `Null`, a missing key, and `""` are all "no value" and equal to each
/// other; for list kinds an empty array joins that class, so an ORM
/// returning `[]` versus omitting the relation produces no spurious change.
pub fn values_equal(kind: FieldKind, a: &Value, b: &Value) -> bool {
    match kind {
        FieldKind::OrderedList | FieldKind::UnorderedList => {
            let a_empty = is_no_value(a) || is_empty_list(a);
            let b_empty = is_no_value(b) || is_empty_list(b);
            if a_empty || b_empty {
                return a_empty == b_empty;
            }
        }
        _ => {
            if is_no_value(a) || is_no_value(b) {
                return is_no_value(a) == is_no_value(b);
            }
        }
    }

    match kind {
        FieldKind::Scalar | FieldKind::Object => a == b,
        FieldKind::Date => match (as_millis(a), as_millis(b)) {
            (Some(left), Some(right)) => left == right,
            _ => a == b,
        },
        FieldKind::OrderedList => a == b,
        FieldKind::UnorderedList => match (a, b) {
            (Value::Array(left), Value::Array(right)) => multisets_equal(left, right),
            _ => a == b,
        },
    }
}
