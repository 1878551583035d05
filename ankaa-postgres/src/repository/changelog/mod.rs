pub mod change_log_repository;
pub mod factory;

pub use factory::{ChangelogRepoFactory, ChangelogRepositories};
