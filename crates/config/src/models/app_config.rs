use std::path::Path;

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use fleet_sync_domain::DispatcherEntry;
use serde::{Deserialize, Serialize};

use super::{api::FleetApiConfig, database::DatabaseConfig, sync::SyncConfig};
use crate::validation::{ConfigValidator, ValidationUtils};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: FleetApiConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    /// Dispatcher reference table. Order is semantic: when a driver appears
    /// under more than one dispatcher, the later entry wins.
    #[serde(default = "default_dispatchers")]
    pub dispatchers: Vec<DispatcherEntry>,
}

/// The roster the service shipped with. Kept as a default so a deployment
/// without a `[[dispatchers]]` section behaves like the original.
fn default_dispatchers() -> Vec<DispatcherEntry> {
    [
        (12, "Marko"),
        (28, "Mario"),
        (53, "Paul"),
        (57, "Milos"),
        (65, "Aleks"),
        (70, "Luka"),
        (72, "Adrian"),
        (78, "David"),
        (79, "Kevin"),
        (80, "Monte"),
        (81, "Austin"),
    ]
    .into_iter()
    .map(|(id, name)| DispatcherEntry {
        id,
        name: name.to_string(),
    })
    .collect()
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if !Path::new(path).exists() {
                return Err(anyhow::anyhow!("config file not found: {path}"));
            }
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        } else {
            let default_paths = [
                "config/fleet-sync.toml",
                "fleet-sync.toml",
                "/etc/fleet-sync/config.toml",
            ];
            for path in &default_paths {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    break;
                }
            }
        }

        // Environment overrides, e.g. FLEET_SYNC_API__TOKEN_URL maps to
        // api.token_url and FLEET_SYNC_DATABASE__URL to database.url.
        builder = builder.add_source(
            Environment::with_prefix("FLEET_SYNC")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("failed to assemble configuration sources")?
            .try_deserialize()
            .context("missing or malformed required configuration")?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config to TOML")
    }
}

impl ConfigValidator for AppConfig {
    fn validate(&self) -> fleet_sync_core::SyncResult<()> {
        self.api.validate()?;
        self.database.validate()?;
        self.sync.validate()?;
        for entry in &self.dispatchers {
            ValidationUtils::validate_not_empty(&entry.name, "dispatchers.name")?;
            if entry.id <= 0 {
                return Err(fleet_sync_core::SyncError::config_error(format!(
                    "dispatchers.id must be positive, got {}",
                    entry.id
                )));
            }
        }
        Ok(())
    }
}
