use async_trait::async_trait;
use fleet_sync_config::FleetApiConfig;
use fleet_sync_core::{SyncError, SyncResult};
use fleet_sync_domain::{ApiToken, DriverFetcher, RawDriver};
use serde::Deserialize;
use tracing::{error, info};

use super::bearer_header;

/// Retrieves the full roster in a single request, using an always-true
/// filter on the driver identifier column. The API returns the list nested
/// two levels deep; a missing level degrades to an empty roster.
pub struct HttpDriverFetcher {
    client: reqwest::Client,
    drivers_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct DriverListEnvelope {
    #[serde(default)]
    data: DriverListPage,
}

#[derive(Debug, Default, Deserialize)]
struct DriverListPage {
    #[serde(default)]
    data: Vec<RawDriver>,
}

impl HttpDriverFetcher {
    pub fn new(client: reqwest::Client, config: &FleetApiConfig) -> Self {
        Self {
            client,
            drivers_url: config.drivers_url.clone(),
        }
    }

    fn roster_filter() -> serde_json::Value {
        serde_json::json!({
            "filterItems": [{
                "columnName": "driverId",
                "filterType": 5,
                "filterFromValue": "",
            }]
        })
    }
}

#[async_trait]
impl DriverFetcher for HttpDriverFetcher {
    async fn fetch_all(&self, token: &ApiToken) -> SyncResult<Vec<RawDriver>> {
        let response = self
            .client
            .post(&self.drivers_url)
            .header("Authorization", bearer_header(token))
            .json(&Self::roster_filter())
            .send()
            .await
            .map_err(|e| SyncError::fetch_error("drivers", format!("endpoint unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            error!("driver list endpoint returned HTTP {status}");
            return Err(SyncError::fetch_error(
                "drivers",
                format!("endpoint returned HTTP {status}"),
            ));
        }

        let envelope: DriverListEnvelope = response
            .json()
            .await
            .map_err(|e| SyncError::fetch_error("drivers", format!("unreadable payload: {e}")))?;

        let roster = envelope.data.data;
        info!(drivers = roster.len(), "driver roster fetched");
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_filter_shape() {
        let filter = HttpDriverFetcher::roster_filter();
        let items = filter["filterItems"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["columnName"], "driverId");
        assert_eq!(items[0]["filterType"], 5);
        assert_eq!(items[0]["filterFromValue"], "");
    }

    #[test]
    fn test_envelope_unwraps_nested_list() {
        let body = r#"{"data": {"data": [{"driverId": "A1"}, {"driverId": "B2"}]}}"#;
        let envelope: DriverListEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.data.len(), 2);
        assert_eq!(envelope.data.data[0].driver_id, "A1");
    }

    #[test]
    fn test_envelope_rejects_driver_without_id() {
        let body = r#"{"data": {"data": [{"status": "Active"}]}}"#;
        assert!(serde_json::from_str::<DriverListEnvelope>(body).is_err());
    }

    #[test]
    fn test_envelope_tolerates_missing_levels() {
        for body in [r#"{}"#, r#"{"data": {}}"#, r#"{"data": {"data": []}}"#] {
            let envelope: DriverListEnvelope = serde_json::from_str(body).unwrap();
            assert!(envelope.data.data.is_empty());
        }
    }
}
