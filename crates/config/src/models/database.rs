use serde::{Deserialize, Serialize};

use crate::validation::{ConfigValidator, ValidationUtils};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_seconds: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

impl ConfigValidator for DatabaseConfig {
    fn validate(&self) -> fleet_sync_core::SyncResult<()> {
        ValidationUtils::validate_not_empty(&self.url, "database.url")?;

        if !self.url.starts_with("postgresql://") && !self.url.starts_with("postgres://") {
            return Err(fleet_sync_core::SyncError::config_error(
                "database.url must start with postgresql:// or postgres://",
            ));
        }

        ValidationUtils::validate_positive(self.max_connections as u64, "database.max_connections")?;

        if self.min_connections > self.max_connections {
            return Err(fleet_sync_core::SyncError::config_error(
                "database.min_connections must be less than or equal to max_connections",
            ));
        }

        ValidationUtils::validate_positive(
            self.connection_timeout_seconds,
            "database.connection_timeout_seconds",
        )?;
        ValidationUtils::validate_positive(self.idle_timeout_seconds, "database.idle_timeout_seconds")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgresql://localhost/fleet".to_string(),
            max_connections: 10,
            min_connections: 1,
            connection_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        }
    }

    #[test]
    fn test_database_config_validation() {
        assert!(valid().validate().is_ok());

        let mut bad = valid();
        bad.url = "mysql://localhost/fleet".to_string();
        assert!(bad.validate().is_err());

        let mut bad = valid();
        bad.max_connections = 0;
        assert!(bad.validate().is_err());

        let mut bad = valid();
        bad.min_connections = 20;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_pool_knobs_default_when_absent() {
        let config: DatabaseConfig =
            toml::from_str(r#"url = "postgresql://localhost/fleet""#).unwrap();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connection_timeout_seconds, 30);
        assert_eq!(config.idle_timeout_seconds, 600);
    }
}
