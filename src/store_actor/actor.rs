//! # Store Actor
//!
//! [`StoreActor`] is the single owner of the store's mutable state: client
//! lifecycle, the catalog-request latch, load progress and both catalog maps.
//!
//! **Concurrency Model**:
//! The actor handles one message at a time and never awaits the platform
//! itself. Each platform chain (readiness, catalog load, purchase, consume)
//! runs in a spawned task and posts a [`Completion`] back, so every map
//! mutation happens inside the message loop. A purchase that completes while the
//! catalog load is still running is simply another message in the queue.
//!
//! ## Gating the catalog load
//!
//! A load starts the first time the client is ready *and* a catalog request
//! has arrived, in whichever order those happen. Only one load runs per store;
//! later requests are ignored. A failed load can be retried by calling
//! `initialize` again.
//!
//! ## Purchase outcomes
//!
//! | Situation                           | Outcome                                   |
//! |-------------------------------------|-------------------------------------------|
//! | product not in catalog              | `Failed(ProductUnavailable, "UnknownProduct")` |
//! | intent creation failed              | `Failed(Unknown, <error message>)`        |
//! | resolution transport failure        | `Failed(Unknown, <error message>)`        |
//! | result code `Success`               | `Succeeded`, ownership recorded first     |
//! | result code `AlreadyOwned`          | `Failed(AlreadyOwned, <message>)`         |
//! | result code `Cancelled`             | `Failed(UserCancelled, <message>)`        |
//! | any other result code               | `Failed(Unknown, <message>)`              |

use crate::catalog::{CatalogAccumulator, CatalogLoader};
use crate::clients::StoreClient;
use crate::config::StoreConfig;
use crate::model::{
    ProductRequest, PurchaseFailure, PurchaseFailureReason, PurchaseIntentRequest,
    PurchaseResolution, ResultCode, SetupFailure,
};
use crate::platform::PurchasePlatform;
use crate::store_actor::{
    CatalogStatus, ClientState, Completion, StoreError, StoreEvents, StoreRequest, StoreSnapshot,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub const UNKNOWN_PRODUCT: &str = "UnknownProduct";
pub const MISSING_PURCHASE_DATA: &str = "MissingPurchaseData";

/// The store's single-writer actor.
///
/// Create it with [`StoreActor::new`] (or [`crate::store_actor::new`]), then
/// spawn [`StoreActor::run`] and talk to it through the returned
/// [`StoreClient`].
pub struct StoreActor<P: PurchasePlatform> {
    receiver: mpsc::Receiver<StoreRequest>,
    completions: mpsc::UnboundedReceiver<Completion>,
    completion_sender: mpsc::UnboundedSender<Completion>,
    platform: Arc<P>,
    config: StoreConfig,
    events: Option<Arc<dyn StoreEvents>>,
    client_state: ClientState,
    requested: Option<Vec<ProductRequest>>,
    catalog_status: CatalogStatus,
    catalog: CatalogAccumulator,
}

impl<P: PurchasePlatform> StoreActor<P> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `config.request_buffer` bounds the request channel; when it is full,
    /// client calls wait for space.
    pub fn new(platform: Arc<P>, config: StoreConfig) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(config.request_buffer.max(1));
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            completions,
            completion_sender,
            platform,
            config,
            events: None,
            client_state: ClientState::Uninitialized,
            requested: None,
            catalog_status: CatalogStatus::Idle,
            catalog: CatalogAccumulator::new(),
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop until every `StoreClient` is dropped.
    pub async fn run(mut self) {
        info!(store = %self.config.store_name, "Store actor started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                Some(completion) = self.completions.recv() => self.handle_completion(completion),
            }
        }

        info!(
            products = self.catalog.product_count(),
            owned = self.catalog.owned_count(),
            "Shutdown"
        );
    }

    fn handle_request(&mut self, request: StoreRequest) {
        match request {
            StoreRequest::Initialize { events, respond_to } => {
                self.initialize(events);
                let _ = respond_to.send(Ok(()));
            }
            StoreRequest::RetrieveProducts {
                products,
                respond_to,
            } => {
                self.request_catalog(products);
                let _ = respond_to.send(Ok(()));
            }
            StoreRequest::Purchase {
                product_id,
                payload,
                respond_to,
            } => {
                let result = self.purchase(product_id, payload);
                let _ = respond_to.send(result);
            }
            StoreRequest::FinishTransaction {
                product_id,
                respond_to,
            } => {
                let result = self.finish_transaction(product_id);
                let _ = respond_to.send(result);
            }
            StoreRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.snapshot()));
            }
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::ClientReady(Ok(())) => {
                info!("Platform client ready");
                self.client_state = ClientState::ClientReady;
                self.try_start_load();
            }
            Completion::ClientReady(Err(e)) => {
                error!(error = %e, "Platform client initialization failed");
                self.client_state = ClientState::ClientFailed;
                self.emit(|events| events.on_setup_failed(SetupFailure::PurchasingUnavailable));
            }
            Completion::CatalogLoaded(Ok(loaded)) => {
                self.catalog.merge(loaded);
                self.catalog_status = CatalogStatus::Published;
                let products = self.catalog.describe(&self.config.store_name);
                info!(
                    products = products.len(),
                    owned = self.catalog.owned_count(),
                    "Catalog published"
                );
                self.emit(move |events| events.on_products_retrieved(products));
            }
            Completion::CatalogLoaded(Err(e)) => {
                error!(error = %e, "Catalog load failed");
                self.catalog_status = CatalogStatus::Failed;
                self.emit(|events| events.on_setup_failed(SetupFailure::NoProductsAvailable));
            }
            Completion::PurchaseResolved { product_id, result } => {
                self.complete_purchase(product_id, result);
            }
            Completion::Consumed {
                product_id,
                token,
                result,
            } => match result {
                Ok(()) => {
                    if self.catalog.remove_consumed(&product_id, &token) {
                        info!(%product_id, "Purchase consumed");
                    } else {
                        debug!(%product_id, "Consumed record was already replaced");
                    }
                }
                Err(e) => warn!(%product_id, error = %e, "Consume failed, transaction kept"),
            },
        }
    }

    fn initialize(&mut self, events: Arc<dyn StoreEvents>) {
        let retry = self.client_state == ClientState::ClientFailed
            || self.catalog_status == CatalogStatus::Failed;
        if self.client_state != ClientState::Uninitialized && !retry {
            warn!(state = ?self.client_state, "Initialize ignored, client already started");
            return;
        }

        if self.catalog_status == CatalogStatus::Failed {
            self.catalog_status = CatalogStatus::Idle;
        }
        self.events = Some(events);
        self.client_state = ClientState::ClientStarting;
        info!(retry, "Starting platform client");

        let platform = self.platform.clone();
        let completions = self.completion_sender.clone();
        tokio::spawn(async move {
            let result = platform.ensure_ready().await;
            let _ = completions.send(Completion::ClientReady(result));
        });
    }

    fn request_catalog(&mut self, products: Vec<ProductRequest>) {
        if self.catalog_status.run_started() {
            warn!(status = ?self.catalog_status, "Catalog request ignored, load already started");
            return;
        }
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        info!(?ids, "Catalog requested");
        self.requested = Some(products);
        self.try_start_load();
    }

    fn try_start_load(&mut self) {
        if self.client_state != ClientState::ClientReady || self.catalog_status.run_started() {
            return;
        }
        let Some(requests) = self.requested.clone() else {
            return;
        };

        self.catalog_status = CatalogStatus::Loading;
        debug!(requested = requests.len(), "Starting catalog load");

        let loader = CatalogLoader::new(self.platform.clone(), requests, CatalogAccumulator::new());
        let completions = self.completion_sender.clone();
        tokio::spawn(async move {
            let result = loader.run().await;
            let _ = completions.send(Completion::CatalogLoaded(result));
        });
    }

    fn purchase(&mut self, product_id: String, payload: String) -> Result<(), StoreError> {
        if self.events.is_none() {
            return Err(StoreError::NotInitialized);
        }

        let Some(info) = self.catalog.product(&product_id) else {
            warn!(%product_id, "Purchase of unknown product");
            let failure = PurchaseFailure::new(
                product_id,
                PurchaseFailureReason::ProductUnavailable,
                UNKNOWN_PRODUCT,
            );
            self.emit(move |events| events.on_purchase_failed(failure));
            return Ok(());
        };

        let request = PurchaseIntentRequest {
            price_type: info.price_type,
            product_id: info.id.clone(),
            developer_payload: payload,
        };
        debug!(%product_id, ?request, "Purchase requested");

        let platform = self.platform.clone();
        let completions = self.completion_sender.clone();
        tokio::spawn(async move {
            let result = resolve_purchase(platform.as_ref(), request).await;
            let _ = completions.send(Completion::PurchaseResolved { product_id, result });
        });
        Ok(())
    }

    fn complete_purchase(
        &mut self,
        product_id: String,
        result: Result<PurchaseResolution, PurchaseFailure>,
    ) {
        let resolution = match result {
            Ok(resolution) => resolution,
            Err(failure) => {
                warn!(%product_id, message = %failure.message, "Purchase failed before resolution");
                self.emit(move |events| events.on_purchase_failed(failure));
                return;
            }
        };

        match (resolution.code, resolution.purchase) {
            (ResultCode::Success, Some(record)) => {
                let signature = record.signature.clone();
                let order_id = record.order_id.clone();
                if let Some(replaced) = self.catalog.record_purchase(record) {
                    warn!(%product_id, replaced_order = %replaced.order_id, "Unconsumed purchase replaced");
                }
                info!(%product_id, %order_id, "Purchase succeeded");
                self.emit(|events| events.on_purchase_succeeded(&product_id, &signature, &order_id));
            }
            (ResultCode::Success, None) => {
                warn!(%product_id, "Purchase succeeded without purchase data");
                let failure =
                    PurchaseFailure::new(product_id, PurchaseFailureReason::Unknown, MISSING_PURCHASE_DATA);
                self.emit(move |events| events.on_purchase_failed(failure));
            }
            (code, _) => {
                let reason = PurchaseFailureReason::from_result_code(code);
                info!(%product_id, ?code, %reason, "Purchase not completed");
                let failure = PurchaseFailure::new(product_id, reason, resolution.message);
                self.emit(move |events| events.on_purchase_failed(failure));
            }
        }
    }

    fn finish_transaction(&mut self, product_id: String) -> Result<(), StoreError> {
        if self.events.is_none() {
            return Err(StoreError::NotInitialized);
        }
        let Some(record) = self.catalog.owned(&product_id) else {
            debug!(%product_id, "Nothing to finish");
            return Ok(());
        };
        let token = record.purchase_token.clone();
        debug!(%product_id, "Consuming purchase");

        let platform = self.platform.clone();
        let completions = self.completion_sender.clone();
        tokio::spawn(async move {
            let result = platform.consume(&token).await;
            let _ = completions.send(Completion::Consumed {
                product_id,
                token,
                result,
            });
        });
        Ok(())
    }

    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            client_state: self.client_state,
            catalog_status: self.catalog_status,
            catalog_requested: self.requested.is_some(),
            catalog: self.catalog.clone(),
        }
    }

    fn emit(&self, notify: impl FnOnce(&dyn StoreEvents)) {
        match &self.events {
            Some(events) => notify(events.as_ref()),
            None => warn!("Event dropped, store not initialized"),
        }
    }
}

/// Creates the intent and runs its resolution, translating platform errors
/// into `Unknown` purchase failures.
async fn resolve_purchase<P: PurchasePlatform + ?Sized>(
    platform: &P,
    request: PurchaseIntentRequest,
) -> Result<PurchaseResolution, PurchaseFailure> {
    let product_id = request.product_id.clone();
    let unknown = |message: String| {
        PurchaseFailure::new(product_id.clone(), PurchaseFailureReason::Unknown, message)
    };

    let intent = platform
        .create_intent(request)
        .await
        .map_err(|e| unknown(e.message))?;
    debug!(%product_id, "Intent created, awaiting resolution");

    platform
        .resolve_intent(intent)
        .await
        .map_err(|e| unknown(e.message))
}
