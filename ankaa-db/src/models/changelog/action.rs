use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What kind of mutation a changelog row records.
///
/// Closed enumeration: unrecognized tags are rejected at the boundary
/// (serde / `FromStr`) instead of being stored as open strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "change_log_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeLogAction {
    Create,
    Update,
    Delete,
    Restore,
    Archive,
    BatchCreate,
    BatchUpdate,
    BatchDelete,
}

impl ChangeLogAction {
    /// Whole-entity actions carry no `field`; per-field actions always do.
    pub fn is_field_level(&self) -> bool {
        matches!(self, ChangeLogAction::Update | ChangeLogAction::BatchUpdate)
    }
}

impl std::fmt::Display for ChangeLogAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: &str = match self {
            ChangeLogAction::Create => "CREATE",
            ChangeLogAction::Update => "UPDATE",
            ChangeLogAction::Delete => "DELETE",
            ChangeLogAction::Restore => "RESTORE",
            ChangeLogAction::Archive => "ARCHIVE",
            ChangeLogAction::BatchCreate => "BATCH_CREATE",
            ChangeLogAction::BatchUpdate => "BATCH_UPDATE",
            ChangeLogAction::BatchDelete => "BATCH_DELETE",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ChangeLogAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(ChangeLogAction::Create),
            "UPDATE" => Ok(ChangeLogAction::Update),
            "DELETE" => Ok(ChangeLogAction::Delete),
            "RESTORE" => Ok(ChangeLogAction::Restore),
            "ARCHIVE" => Ok(ChangeLogAction::Archive),
            "BATCH_CREATE" => Ok(ChangeLogAction::BatchCreate),
            "BATCH_UPDATE" => Ok(ChangeLogAction::BatchUpdate),
            "BATCH_DELETE" => Ok(ChangeLogAction::BatchDelete),
            _ => Err(()),
        }
    }
}
