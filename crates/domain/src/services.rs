use std::sync::Arc;

use chrono::{DateTime, Utc};
use fleet_sync_core::SyncResult;
use tracing::{error, info, warn};

use crate::join::join_drivers;
use crate::traits::{DispatcherFetcher, DriverFetcher, DriverRepository, TokenProvider};

/// What one pipeline run did. Logged by the caller; nothing awaits it.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub drivers_fetched: usize,
    pub assignments: usize,
    pub records_written: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Sequences one fetch-join-upsert run.
///
/// Failure policy is asymmetric on purpose: token acquisition and either
/// fetch abort the run before any write is attempted, while a persistence
/// failure is logged and the run still reports completion.
pub struct SyncService {
    token_provider: Arc<dyn TokenProvider>,
    driver_fetcher: Arc<dyn DriverFetcher>,
    dispatcher_fetcher: Arc<dyn DispatcherFetcher>,
    driver_repository: Arc<dyn DriverRepository>,
}

impl SyncService {
    pub fn new(
        token_provider: Arc<dyn TokenProvider>,
        driver_fetcher: Arc<dyn DriverFetcher>,
        dispatcher_fetcher: Arc<dyn DispatcherFetcher>,
        driver_repository: Arc<dyn DriverRepository>,
    ) -> Self {
        Self {
            token_provider,
            driver_fetcher,
            dispatcher_fetcher,
            driver_repository,
        }
    }

    pub async fn run_once(&self) -> SyncResult<SyncOutcome> {
        let started_at = Utc::now();
        info!("starting driver sync run");

        let token = self.token_provider.acquire().await?;

        // Both fetches depend only on the token, so they are issued
        // concurrently. The first error aborts the run with nothing written.
        let (raw_drivers, assignments) = tokio::try_join!(
            self.driver_fetcher.fetch_all(&token),
            self.dispatcher_fetcher.fetch_assignments(&token),
        )?;

        if raw_drivers.is_empty() {
            warn!("driver roster came back empty; this run will write nothing");
        }

        let records = join_drivers(&raw_drivers, &assignments, started_at);

        // The write stage always runs, even for an empty roster. A failure
        // here is contained: logged, counted as zero, run reports completion.
        let records_written = match self.driver_repository.upsert_all(&records).await {
            Ok(written) => written,
            Err(e) => {
                error!("persistence failed, run completes without writes: {e}");
                0
            }
        };

        let finished_at = Utc::now();
        let outcome = SyncOutcome {
            drivers_fetched: raw_drivers.len(),
            assignments: assignments.len(),
            records_written,
            started_at,
            finished_at,
        };

        info!(
            drivers = outcome.drivers_fetched,
            assignments = outcome.assignments,
            written = outcome.records_written,
            "sync run complete"
        );

        Ok(outcome)
    }
}
