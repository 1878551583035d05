use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for appending many records in one statement.
///
/// The whole batch is inserted by a single multi-row insert: it either
/// succeeds for every record or fails for every record. No partial-success
/// result shape exists; callers must assume all-or-nothing.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type that must implement Identifiable
///
/// # Example
/// ```ignore
/// impl CreateBatch<Postgres, ChangeLogModel> for ChangeLogRepositoryImpl {
///     async fn create_batch(&self, items: Vec<ChangeLogModel>) -> Result<u64, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait CreateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Insert all records in a single statement.
    ///
    /// # Returns
    /// * `Ok(u64)` - The number of records inserted
    /// * `Err` - An error if the statement could not be executed; in that
    ///   case none of the records were inserted
    async fn create_batch(
        &self,
        items: Vec<T>,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;
}
