use crate::clients::StoreClient;
use crate::config::StoreConfig;
use crate::platform::PurchasePlatform;
use std::sync::Arc;
use tracing::{error, info};

/// A running store: the spawned [`StoreActor`](crate::store_actor::StoreActor)
/// and the client that drives it.
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::with_config(platform, StoreConfig::from_env());
/// system.client.initialize(Arc::new(events)).await?;
/// system.client.retrieve_products(catalog).await?;
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    /// Client for interacting with the store actor
    pub client: StoreClient,

    handle: tokio::task::JoinHandle<()>,
}

impl StoreSystem {
    /// Spawns a store with the default configuration.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new<P: PurchasePlatform>(platform: Arc<P>) -> Self {
        Self::with_config(platform, StoreConfig::default())
    }

    pub fn with_config<P: PurchasePlatform>(platform: Arc<P>, config: StoreConfig) -> Self {
        let (actor, client) = crate::store_actor::new(platform, config);
        let handle = tokio::spawn(actor.run());
        Self { client, handle }
    }

    /// Gracefully shuts down the store.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store...");

        // Dropping the client closes the request channel; the actor exits on `None`.
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Store actor task failed: {:?}", e);
            return Err(format!("Store actor task failed: {:?}", e));
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}
