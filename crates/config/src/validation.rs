use fleet_sync_core::{SyncError, SyncResult};

/// Every configuration section validates itself after deserialization.
pub trait ConfigValidator {
    fn validate(&self) -> SyncResult<()>;
}

pub struct ValidationUtils;

impl ValidationUtils {
    pub fn validate_not_empty(value: &str, field: &str) -> SyncResult<()> {
        if value.trim().is_empty() {
            return Err(SyncError::config_error(format!("{field} must not be empty")));
        }
        Ok(())
    }

    pub fn validate_url(value: &str, field: &str) -> SyncResult<()> {
        Self::validate_not_empty(value, field)?;
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(SyncError::config_error(format!(
                "{field} must start with http:// or https://"
            )));
        }
        Ok(())
    }

    pub fn validate_positive(value: u64, field: &str) -> SyncResult<()> {
        if value == 0 {
            return Err(SyncError::config_error(format!("{field} must be greater than zero")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(ValidationUtils::validate_not_empty("x", "field").is_ok());
        assert!(ValidationUtils::validate_not_empty("", "field").is_err());
        assert!(ValidationUtils::validate_not_empty("   ", "field").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(ValidationUtils::validate_url("https://api.example.com/token", "f").is_ok());
        assert!(ValidationUtils::validate_url("http://localhost:8080", "f").is_ok());
        assert!(ValidationUtils::validate_url("ftp://example.com", "f").is_err());
        assert!(ValidationUtils::validate_url("", "f").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(ValidationUtils::validate_positive(1, "f").is_ok());
        assert!(ValidationUtils::validate_positive(0, "f").is_err());
    }
}
