pub mod changelog_service;
pub mod task_changelog_service;

// Re-exports
pub use changelog_service::*;
pub use task_changelog_service::*;
