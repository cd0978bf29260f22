//! Component seams of the pipeline, one trait per stage so each can be
//! substituted in tests.

use async_trait::async_trait;
use fleet_sync_core::SyncResult;

use crate::entities::{ApiToken, AssignmentMap, DriverRecord, RawDriver};

#[cfg(test)]
use mockall::automock;

/// Obtains a short-lived bearer credential from the external authority.
/// A failure here aborts the entire run; there is no internal retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn acquire(&self) -> SyncResult<ApiToken>;
}

/// Retrieves the full current driver roster in one request. An empty or
/// missing result set degrades to an empty vector, never an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DriverFetcher: Send + Sync {
    async fn fetch_all(&self, token: &ApiToken) -> SyncResult<Vec<RawDriver>>;
}

/// Builds the `driverId -> dispatcher name` map by querying one endpoint per
/// configured dispatcher. Any single request failure aborts the whole run.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DispatcherFetcher: Send + Sync {
    async fn fetch_assignments(&self, token: &ApiToken) -> SyncResult<AssignmentMap>;
}

/// Insert-or-update persistence keyed by driver identifier. Returns the
/// number of records durably written; a per-record failure must not stop
/// the remaining records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn upsert_all(&self, records: &[DriverRecord]) -> SyncResult<usize>;
}
