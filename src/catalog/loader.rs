//! # Staged Catalog Loader
//!
//! The platform can only fetch product details and owned purchases one
//! [`ProductClass`] at a time. [`CatalogLoader`] turns that into one sequential
//! pipeline:
//!
//! ```text
//! Pending ─► FetchingInfo(Consumable) ─► FetchingOwned(Consumable)
//!        ─► FetchingInfo(NonConsumable) ─► FetchingOwned(NonConsumable)
//!        ─► FetchingInfo(Subscription) ─► FetchingOwned(Subscription) ─► Completed
//! ```
//!
//! Classes with no requested products are skipped entirely. A failed info fetch
//! moves straight to `Failed`; a failed ownership fetch counts as "nothing owned"
//! and the pipeline moves on.
//!
//! Each [`CatalogLoader::step`] issues at most one platform call, so there is
//! never more than one request in flight and the accumulator needs no locking.

use crate::catalog::CatalogAccumulator;
use crate::model::{ProductClass, ProductRequest};
use crate::platform::{ClientError, PurchasePlatform};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Position of a load run. `FetchingInfo` and `FetchingOwned` name the call
/// the *next* step will make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    FetchingInfo(ProductClass),
    FetchingOwned(ProductClass),
    Completed,
    Failed,
}

impl LoadState {
    pub fn is_terminal(self) -> bool {
        matches!(self, LoadState::Completed | LoadState::Failed)
    }
}

/// Why a load run halted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Products unavailable for {class}: {source}")]
    ProductsUnavailable {
        class: ProductClass,
        #[source]
        source: ClientError,
    },
}

/// One catalog load run.
pub struct CatalogLoader<P: PurchasePlatform + ?Sized> {
    platform: Arc<P>,
    requests: Vec<ProductRequest>,
    catalog: CatalogAccumulator,
    state: LoadState,
}

impl<P: PurchasePlatform + ?Sized> CatalogLoader<P> {
    /// Creates a run that fills `catalog` with the products in `requests`.
    pub fn new(
        platform: Arc<P>,
        requests: Vec<ProductRequest>,
        catalog: CatalogAccumulator,
    ) -> Self {
        Self {
            platform,
            requests,
            catalog,
            state: LoadState::Pending,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn catalog(&self) -> &CatalogAccumulator {
        &self.catalog
    }

    /// Positions the run on the first class that has requested products.
    /// Does nothing once the run has left `Pending`.
    pub fn start(&mut self) {
        if self.state == LoadState::Pending {
            self.state = self.first_requested_from(Some(ProductClass::SEQUENCE[0]));
            debug!(state = ?self.state, requested = self.requests.len(), "Load started");
        }
    }

    /// Performs one transition and returns the new state.
    ///
    /// Terminal states are left untouched.
    pub async fn step(&mut self) -> Result<LoadState, LoadError> {
        match self.state {
            LoadState::Pending => self.start(),
            LoadState::FetchingInfo(class) => {
                let ids = self.requested_ids(class);
                match self.platform.fetch_info(class, &ids).await {
                    Ok(infos) => {
                        if !infos.is_empty() {
                            let loaded: Vec<&str> = infos.iter().map(|i| i.id.as_str()).collect();
                            debug!(%class, ?loaded, "Loaded product infos");
                        }
                        self.catalog.insert_products(infos);
                        self.state = LoadState::FetchingOwned(class);
                    }
                    Err(source) => {
                        warn!(%class, error = %source, "Product info fetch failed");
                        self.state = LoadState::Failed;
                        return Err(LoadError::ProductsUnavailable { class, source });
                    }
                }
            }
            LoadState::FetchingOwned(class) => {
                match self.platform.fetch_owned(class).await {
                    Ok(Some(records)) => {
                        for record in &records {
                            debug!(%class, product_id = %record.product_id, order_id = %record.order_id, "Owned purchase");
                        }
                        self.catalog.insert_owned(records);
                    }
                    Ok(None) => debug!(%class, "No ownership data"),
                    Err(e) => warn!(%class, error = %e, "Ownership fetch failed, treating as empty"),
                }
                self.state = self.first_requested_from(class.next());
            }
            LoadState::Completed | LoadState::Failed => {}
        }
        Ok(self.state)
    }

    /// Drives the run to a terminal state and hands back the filled catalog.
    pub async fn run(mut self) -> Result<CatalogAccumulator, LoadError> {
        self.start();
        while !self.state.is_terminal() {
            self.step().await?;
        }
        info!(
            products = self.catalog.product_count(),
            owned = self.catalog.owned_count(),
            "Catalog load completed"
        );
        Ok(self.catalog)
    }

    fn requested_ids(&self, class: ProductClass) -> Vec<String> {
        self.requests
            .iter()
            .filter(|request| request.class == class)
            .map(|request| request.id.clone())
            .collect()
    }

    fn first_requested_from(&self, mut class: Option<ProductClass>) -> LoadState {
        while let Some(current) = class {
            if self.requests.iter().any(|request| request.class == current) {
                return LoadState::FetchingInfo(current);
            }
            class = current.next();
        }
        LoadState::Completed
    }
}
