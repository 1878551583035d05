pub mod action;
pub mod change_log;
pub mod entity_type;
pub mod triggered_by;

// Re-exports
pub use action::*;
pub use change_log::*;
pub use entity_type::*;
pub use triggered_by::*;
