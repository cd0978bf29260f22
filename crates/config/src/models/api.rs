use serde::{Deserialize, Serialize};

use crate::validation::{ConfigValidator, ValidationUtils};

/// Endpoints and authority headers for the fleet-management API. All six
/// settings are required; there are no usable defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetApiConfig {
    pub token_url: String,
    pub drivers_url: String,
    pub dispatchers_url: String,
    pub application_role: String,
    pub account_id: String,
    pub authorization: String,
}

impl ConfigValidator for FleetApiConfig {
    fn validate(&self) -> fleet_sync_core::SyncResult<()> {
        ValidationUtils::validate_url(&self.token_url, "api.token_url")?;
        ValidationUtils::validate_url(&self.drivers_url, "api.drivers_url")?;
        ValidationUtils::validate_url(&self.dispatchers_url, "api.dispatchers_url")?;
        ValidationUtils::validate_not_empty(&self.application_role, "api.application_role")?;
        ValidationUtils::validate_not_empty(&self.account_id, "api.account_id")?;
        ValidationUtils::validate_not_empty(&self.authorization, "api.authorization")?;
        Ok(())
    }
}
