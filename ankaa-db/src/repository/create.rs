use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for appending a single record.
///
/// Changelog rows are append-only: there is no update counterpart to this
/// trait, and deletes happen only through whole-entity cascading cleanup
/// outside this subsystem.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type that must implement Identifiable
#[async_trait]
pub trait Create<DB: Database, T: Identifiable>: Send + Sync {
    /// Insert one record and return it as persisted.
    ///
    /// # Errors
    /// Storage failures propagate unchanged; no retry is attempted here.
    async fn create(&self, item: T) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
