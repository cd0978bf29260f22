mod api;
mod app_config;
mod database;
mod sync;

pub use api::FleetApiConfig;
pub use app_config::AppConfig;
pub use database::DatabaseConfig;
pub use sync::SyncConfig;
