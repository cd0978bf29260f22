//! Concrete adapters behind the domain seams: reqwest clients for the fleet
//! API and the sqlx/Postgres repository for the drivers table.

pub mod database;
pub mod http;

pub use database::{create_pool, run_migrations, PostgresDriverRepository};
pub use http::{HttpDispatcherFetcher, HttpDriverFetcher, HttpTokenProvider};
