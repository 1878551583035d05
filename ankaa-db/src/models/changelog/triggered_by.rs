use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Audit classification of what caused a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "change_triggered_by", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeTriggeredBy {
    User,
    System,
    BatchOperation,
    Automation,
}

impl std::fmt::Display for ChangeTriggeredBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeTriggeredBy::User => write!(f, "USER"),
            ChangeTriggeredBy::System => write!(f, "SYSTEM"),
            ChangeTriggeredBy::BatchOperation => write!(f, "BATCH_OPERATION"),
            ChangeTriggeredBy::Automation => write!(f, "AUTOMATION"),
        }
    }
}

impl FromStr for ChangeTriggeredBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(ChangeTriggeredBy::User),
            "SYSTEM" => Ok(ChangeTriggeredBy::System),
            "BATCH_OPERATION" => Ok(ChangeTriggeredBy::BatchOperation),
            "AUTOMATION" => Ok(ChangeTriggeredBy::Automation),
            _ => Err(()),
        }
    }
}
