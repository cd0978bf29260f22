use async_trait::async_trait;
use fleet_sync_config::FleetApiConfig;
use fleet_sync_core::{SyncError, SyncResult};
use fleet_sync_domain::{ApiToken, AssignmentMap, DispatcherEntry, DispatcherFetcher};
use serde::Deserialize;
use tracing::{debug, error, info};

use super::bearer_header;

/// Builds the driver-to-dispatcher map by querying one endpoint per roster
/// entry, in roster order. The iteration is deliberately sequential: when a
/// driver is claimed by several dispatchers, the entry later in the roster
/// wins, and that tie-breaker is defined by roster order, not by response
/// arrival. The first failed request aborts the whole run.
pub struct HttpDispatcherFetcher {
    client: reqwest::Client,
    dispatchers_url: String,
    roster: Vec<DispatcherEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct DispatcherDriversEnvelope {
    #[serde(default)]
    data: Vec<DispatcherDriverEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DispatcherDriverEntry {
    record_id: String,
}

impl HttpDispatcherFetcher {
    pub fn new(
        client: reqwest::Client,
        config: &FleetApiConfig,
        roster: Vec<DispatcherEntry>,
    ) -> Self {
        Self {
            client,
            dispatchers_url: config.dispatchers_url.clone(),
            roster,
        }
    }

    async fn fetch_one(
        &self,
        token: &ApiToken,
        dispatcher: &DispatcherEntry,
    ) -> SyncResult<Vec<DispatcherDriverEntry>> {
        let url = format!("{}/{}/item", self.dispatchers_url, dispatcher.id);
        debug!(dispatcher = %dispatcher.name, %url, "fetching dispatcher drivers");

        let response = self
            .client
            .get(&url)
            .header("Authorization", bearer_header(token))
            .send()
            .await
            .map_err(|e| {
                SyncError::fetch_error(
                    "dispatchers",
                    format!("dispatcher {} unreachable: {e}", dispatcher.id),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(dispatcher = %dispatcher.name, "dispatcher endpoint returned HTTP {status}");
            return Err(SyncError::fetch_error(
                "dispatchers",
                format!("dispatcher {} returned HTTP {status}", dispatcher.id),
            ));
        }

        let envelope: DispatcherDriversEnvelope = response.json().await.map_err(|e| {
            SyncError::fetch_error(
                "dispatchers",
                format!("dispatcher {} sent unreadable payload: {e}", dispatcher.id),
            )
        })?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl DispatcherFetcher for HttpDispatcherFetcher {
    async fn fetch_assignments(&self, token: &ApiToken) -> SyncResult<AssignmentMap> {
        let mut assignments = AssignmentMap::new();

        for dispatcher in &self.roster {
            let entries = self.fetch_one(token, dispatcher).await?;
            apply_assignments(&mut assignments, &dispatcher.name, &entries);
        }

        info!(assignments = assignments.len(), "dispatcher assignments built");
        Ok(assignments)
    }
}

/// Records every driver in `entries` as belonging to `dispatcher_name`,
/// overwriting any earlier claim. Driver identifiers arrive padded and are
/// trimmed before use.
fn apply_assignments(
    assignments: &mut AssignmentMap,
    dispatcher_name: &str,
    entries: &[DispatcherDriverEntry],
) {
    for entry in entries {
        assignments.insert(entry.record_id.trim().to_string(), dispatcher_name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(record_id: &str) -> DispatcherDriverEntry {
        DispatcherDriverEntry {
            record_id: record_id.to_string(),
        }
    }

    #[test]
    fn test_apply_trims_record_ids() {
        let mut assignments = AssignmentMap::new();
        apply_assignments(&mut assignments, "Marko", &[entry("  A1  "), entry("B2")]);

        assert_eq!(assignments.get("A1").map(String::as_str), Some("Marko"));
        assert_eq!(assignments.get("B2").map(String::as_str), Some("Marko"));
        assert!(!assignments.contains_key("  A1  "));
    }

    #[test]
    fn test_later_dispatcher_wins_in_roster_order() {
        let mut assignments = AssignmentMap::new();
        apply_assignments(&mut assignments, "Marko", &[entry("A1"), entry("B2")]);
        apply_assignments(&mut assignments, "Mario", &[entry("A1")]);

        // A1 was claimed by both; the dispatcher applied later keeps it.
        assert_eq!(assignments.get("A1").map(String::as_str), Some("Mario"));
        assert_eq!(assignments.get("B2").map(String::as_str), Some("Marko"));
    }

    #[test]
    fn test_envelope_tolerates_missing_data() {
        let envelope: DispatcherDriversEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(envelope.data.is_empty());

        let envelope: DispatcherDriversEnvelope =
            serde_json::from_str(r#"{"data": [{"recordId": "A1 "}]}"#).unwrap();
        assert_eq!(envelope.data[0].record_id, "A1 ");
    }
}
