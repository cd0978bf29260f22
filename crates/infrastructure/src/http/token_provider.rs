use async_trait::async_trait;
use fleet_sync_config::FleetApiConfig;
use fleet_sync_core::{SyncError, SyncResult};
use fleet_sync_domain::{ApiToken, TokenProvider};
use tracing::{error, info};

/// Acquires a fresh bearer credential from the external authority. One call
/// per run, no retry, no caching; a stale token can never leak into a later
/// run.
pub struct HttpTokenProvider {
    client: reqwest::Client,
    token_url: String,
    application_role: String,
    account_id: String,
    authorization: String,
}

impl HttpTokenProvider {
    pub fn new(client: reqwest::Client, config: &FleetApiConfig) -> Self {
        Self {
            client,
            token_url: config.token_url.clone(),
            application_role: config.application_role.clone(),
            account_id: config.account_id.clone(),
            authorization: config.authorization.clone(),
        }
    }
}

#[async_trait]
impl TokenProvider for HttpTokenProvider {
    async fn acquire(&self) -> SyncResult<ApiToken> {
        let response = self
            .client
            .post(&self.token_url)
            .header("Ditat-Application-Role", &self.application_role)
            .header("ditat-account-id", &self.account_id)
            .header("Authorization", &self.authorization)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| SyncError::auth_error(format!("token endpoint unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("token endpoint returned HTTP {status}");
            return Err(SyncError::auth_error(format!(
                "token endpoint returned HTTP {status}: {body}"
            )));
        }

        // The token payload is opaque. A JSON string is unwrapped to its
        // contents; any other shape is carried verbatim.
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SyncError::auth_error(format!("unreadable token payload: {e}")))?;

        let token = match payload {
            serde_json::Value::String(value) => value,
            other => other.to_string(),
        };

        info!("api token acquired");
        Ok(ApiToken::new(token))
    }
}
