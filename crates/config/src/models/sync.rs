use serde::{Deserialize, Serialize};

use crate::validation::{ConfigValidator, ValidationUtils};

/// Schedule of the pipeline: one run at start-up (unless disabled), then
/// one run per interval. The 6-hour default matches the upstream cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub interval_seconds: u64,
    pub run_on_startup: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 6 * 60 * 60,
            run_on_startup: true,
        }
    }
}

impl ConfigValidator for SyncConfig {
    fn validate(&self) -> fleet_sync_core::SyncResult<()> {
        ValidationUtils::validate_positive(self.interval_seconds, "sync.interval_seconds")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_config_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.interval_seconds, 21600);
        assert!(config.run_on_startup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = SyncConfig {
            interval_seconds: 0,
            run_on_startup: true,
        };
        assert!(config.validate().is_err());
    }
}
