pub mod create;
pub mod create_batch;
pub mod load_batch;
pub mod load_for_entity;
pub mod pagination;

// Re-exports
pub use create::*;
pub use create_batch::*;
pub use load_batch::*;
pub use load_for_entity::*;
pub use pagination::*;
