mod pool;
mod postgres_driver_repository;

pub use pool::{create_pool, run_migrations};
pub use postgres_driver_repository::PostgresDriverRepository;

#[cfg(test)]
mod repository_tests;
