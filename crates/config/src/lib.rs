//! Typed configuration for the sync service: the fleet API endpoints and
//! authority headers, the database pool, the schedule, and the dispatcher
//! roster. Loaded from a TOML file layered with `FLEET_SYNC`-prefixed
//! environment variables, then validated; a missing required setting fails
//! start-up.

pub mod models;
pub mod validation;

pub use models::{AppConfig, DatabaseConfig, FleetApiConfig, SyncConfig};
pub use validation::{ConfigValidator, ValidationUtils};
