pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use postgres_repositories::PostgresRepositories;
pub use repository::changelog::change_log_repository::ChangeLogRepositoryImpl;

#[cfg(test)]
pub mod test_helper;
