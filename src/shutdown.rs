use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

/// Graceful-shutdown coordinator. Components subscribe for a one-shot
/// broadcast; triggering shutdown is idempotent.
pub struct ShutdownManager {
    shutdown_tx: Arc<RwLock<Option<broadcast::Sender<()>>>>,
    is_shutdown: Arc<RwLock<bool>>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(16);

        Self {
            shutdown_tx: Arc::new(RwLock::new(Some(shutdown_tx))),
            is_shutdown: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn subscribe(&self) -> broadcast::Receiver<()> {
        let shutdown_tx = self.shutdown_tx.read().await;
        if let Some(ref tx) = *shutdown_tx {
            tx.subscribe()
        } else {
            // Shutdown already happened; hand back a receiver that fires
            // immediately.
            let (tx, rx) = broadcast::channel(1);
            let _ = tx.send(());
            rx
        }
    }

    pub async fn shutdown(&self) {
        let mut is_shutdown = self.is_shutdown.write().await;
        if *is_shutdown {
            debug!("shutdown already triggered");
            return;
        }
        *is_shutdown = true;

        let shutdown_tx = self.shutdown_tx.read().await;
        if let Some(ref tx) = *shutdown_tx {
            debug!("notifying {} shutdown subscribers", tx.receiver_count());
            let _ = tx.send(());
        }
        drop(shutdown_tx);

        let mut shutdown_tx = self.shutdown_tx.write().await;
        *shutdown_tx = None;

        info!("shutdown signal sent");
    }

    pub async fn is_shutdown(&self) -> bool {
        *self.is_shutdown.read().await
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ShutdownManager {
    fn clone(&self) -> Self {
        Self {
            shutdown_tx: Arc::clone(&self.shutdown_tx),
            is_shutdown: Arc::clone(&self.is_shutdown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_shutdown() {
        let manager = ShutdownManager::new();
        let mut rx = manager.subscribe().await;

        manager.shutdown().await;
        assert!(rx.recv().await.is_ok());
        assert!(manager.is_shutdown().await);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let manager = ShutdownManager::new();
        manager.shutdown().await;
        manager.shutdown().await;
        assert!(manager.is_shutdown().await);
    }

    #[tokio::test]
    async fn test_late_subscriber_fires_immediately() {
        let manager = ShutdownManager::new();
        manager.shutdown().await;

        let mut rx = manager.subscribe().await;
        assert!(rx.recv().await.is_ok());
    }
}
