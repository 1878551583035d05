use uuid::Uuid;

/// Trait for rows addressable by a UUID primary key
pub trait Identifiable {
    /// Returns the primary key of the row
    fn get_id(&self) -> Uuid;
}
