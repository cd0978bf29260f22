use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use fleet_sync_config::AppConfig;
use fleet_sync_domain::SyncService;
use fleet_sync_infrastructure::{
    create_pool, run_migrations, HttpDispatcherFetcher, HttpDriverFetcher, HttpTokenProvider,
    PostgresDriverRepository,
};
use sqlx::PgPool;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

/// Owns the wired pipeline and the single-flight scheduler loop.
///
/// All shared resources (the connection pool, the HTTP client) are built
/// here and injected down; nothing is process-global, and the pool is
/// closed explicitly when the loop exits.
pub struct Application {
    config: AppConfig,
    pool: PgPool,
    sync_service: Arc<SyncService>,
}

impl Application {
    pub async fn new(config: AppConfig) -> Result<Self> {
        info!("initializing fleet sync application");

        let pool = create_pool(&config.database)
            .await
            .context("failed to create database pool")?;
        run_migrations(&pool)
            .await
            .context("failed to run database migrations")?;

        let http_client = reqwest::Client::new();

        let token_provider = Arc::new(HttpTokenProvider::new(http_client.clone(), &config.api));
        let driver_fetcher = Arc::new(HttpDriverFetcher::new(http_client.clone(), &config.api));
        let dispatcher_fetcher = Arc::new(HttpDispatcherFetcher::new(
            http_client,
            &config.api,
            config.dispatchers.clone(),
        ));
        let driver_repository = Arc::new(PostgresDriverRepository::new(pool.clone()));

        let sync_service = Arc::new(SyncService::new(
            token_provider,
            driver_fetcher,
            dispatcher_fetcher,
            driver_repository,
        ));

        Ok(Self {
            config,
            pool,
            sync_service,
        })
    }

    /// Runs the scheduler until shutdown, then closes the pool.
    pub async fn run(&self, shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let interval_seconds = self.config.sync.interval_seconds;
        info!(interval_seconds, "starting sync scheduler");

        run_scheduler(
            interval_seconds,
            self.config.sync.run_on_startup,
            shutdown_rx,
            || self.run_sync(),
        )
        .await;

        self.pool.close().await;
        info!("database pool closed");
        Ok(())
    }

    // Fire-and-forget: a failed run is logged and the next scheduled run
    // starts fresh, with no backoff and no state carried over.
    async fn run_sync(&self) {
        match self.sync_service.run_once().await {
            Ok(outcome) => {
                info!(
                    drivers = outcome.drivers_fetched,
                    written = outcome.records_written,
                    "sync run finished"
                );
            }
            Err(e) => {
                error!("sync run aborted: {e}");
            }
        }
    }
}

/// Single-flight scheduler loop: one run at start-up (if enabled), then one
/// per interval. The run is awaited inside the tick arm and missed ticks
/// are skipped, so at most one run is ever in flight and a trigger that
/// fires mid-run is dropped, not queued. Shutdown is only observed between
/// runs; an in-flight run finishes its writes first.
async fn run_scheduler<F, Fut>(
    interval_seconds: u64,
    run_on_startup: bool,
    mut shutdown_rx: broadcast::Receiver<()>,
    mut run_once: F,
) where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    if run_on_startup {
        run_once().await;
    }

    let mut ticker = interval(Duration::from_secs(interval_seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick of a tokio interval completes immediately; the
    // start-up run already covered it.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_once().await;
            }
            _ = shutdown_rx.recv() => {
                info!("scheduler stopping");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_triggers_never_run_concurrently() {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let active = Arc::new(AtomicUsize::new(0));
        let max_active = Arc::new(AtomicUsize::new(0));
        let runs = Arc::new(AtomicUsize::new(0));

        let handle = {
            let active = Arc::clone(&active);
            let max_active = Arc::clone(&max_active);
            let runs = Arc::clone(&runs);

            // Interval of 1s, but each run takes 3s: every run spans
            // several trigger firings.
            tokio::spawn(run_scheduler(1, false, shutdown_rx, move || {
                let active = Arc::clone(&active);
                let max_active = Arc::clone(&max_active);
                let runs = Arc::clone(&runs);
                async move {
                    let now_active = active.fetch_add(1, Ordering::SeqCst) + 1;
                    max_active.fetch_max(now_active, Ordering::SeqCst);
                    runs.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                }
            }))
        };

        tokio::time::sleep(Duration::from_secs(10)).await;
        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();

        // Several triggers fired while runs were in flight; none of them
        // produced a second concurrent run, and the swallowed ticks were
        // dropped rather than queued as back-to-back catch-up runs.
        assert_eq!(max_active.load(Ordering::SeqCst), 1);
        let total = runs.load(Ordering::SeqCst);
        assert!((2..=3).contains(&total), "expected 2-3 runs, got {total}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_startup_run_fires_before_first_interval() {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let runs = Arc::new(AtomicUsize::new(0));

        let handle = {
            let runs = Arc::clone(&runs);
            tokio::spawn(run_scheduler(3600, true, shutdown_rx, move || {
                let runs = Arc::clone(&runs);
                async move {
                    runs.fetch_add(1, Ordering::SeqCst);
                }
            }))
        };

        // Well before the first interval elapses the start-up run is done.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }
}
