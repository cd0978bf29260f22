use thiserror::Error;

/// Unified error type for the sync pipeline.
///
/// The propagation policy lives in the variants: configuration problems are
/// fatal at start-up, auth and fetch problems abort the current run, and
/// write-side problems are logged while the run carries on.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("token acquisition failed: {0}")]
    Auth(String),
    #[error("failed to fetch {resource}: {message}")]
    Fetch { resource: String, message: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn auth_error<S: Into<String>>(msg: S) -> Self {
        Self::Auth(msg.into())
    }

    pub fn fetch_error<R: Into<String>, M: Into<String>>(resource: R, message: M) -> Self {
        Self::Fetch {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn persistence_error<S: Into<String>>(msg: S) -> Self {
        Self::Persistence(msg.into())
    }

    /// Fatal errors terminate the process; everything else is contained to
    /// the current scheduled run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Configuration(_))
    }

    /// Errors that abort the current run before any write is attempted.
    pub fn aborts_run(&self) -> bool {
        matches!(self, SyncError::Auth(_) | SyncError::Fetch { .. })
    }

    /// Write-side errors are logged and the run reports completion anyway.
    pub fn is_write_side(&self) -> bool {
        matches!(self, SyncError::Database(_) | SyncError::Persistence(_))
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for SyncError {
    fn from(err: anyhow::Error) -> Self {
        SyncError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyncError::auth_error("endpoint unreachable");
        assert_eq!(err.to_string(), "token acquisition failed: endpoint unreachable");

        let err = SyncError::fetch_error("drivers", "HTTP 503");
        assert_eq!(err.to_string(), "failed to fetch drivers: HTTP 503");
    }

    #[test]
    fn test_propagation_classes() {
        assert!(SyncError::config_error("missing api.token_url").is_fatal());
        assert!(!SyncError::config_error("missing api.token_url").aborts_run());

        assert!(SyncError::auth_error("x").aborts_run());
        assert!(SyncError::fetch_error("dispatchers", "x").aborts_run());
        assert!(!SyncError::auth_error("x").is_fatal());

        assert!(SyncError::persistence_error("x").is_write_side());
        assert!(!SyncError::persistence_error("x").aborts_run());
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: SyncError = json_err.into();
        assert!(matches!(err, SyncError::Serialization(_)));
    }

    #[test]
    fn test_from_anyhow() {
        let err: SyncError = anyhow::anyhow!("wiring failure").into();
        assert!(matches!(err, SyncError::Internal(_)));
    }
}
