//! # Store Client
//!
//! [`StoreClient`] forwards each store operation to the [`StoreActor`](crate::store_actor::StoreActor)
//! over a Tokio mpsc channel and waits for the actor's acknowledgement on a
//! oneshot channel. It holds only a sender, so clones are cheap and can be
//! handed to any task.
//!
//! Acknowledgement means the request has been *accepted*, not that the
//! platform work behind it has finished. Results of that work arrive through
//! the [`StoreEvents`] sink given to [`StoreClient::initialize`].

use crate::model::ProductRequest;
use crate::store_actor::{StoreError, StoreEvents, StoreRequest, StoreSnapshot};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    /// Installs the event sink and starts the platform client.
    ///
    /// Calling it again only has an effect after a setup failure, in which
    /// case the client (and a failed catalog load) are retried.
    #[instrument(skip(self, events))]
    pub async fn initialize(&self, events: Arc<dyn StoreEvents>) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::Initialize { events, respond_to })
            .await
    }

    /// Records the catalog to load. The load starts once the client is ready.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn retrieve_products(&self, products: Vec<ProductRequest>) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::RetrieveProducts {
            products,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, payload))]
    pub async fn purchase(
        &self,
        product_id: impl Into<String> + std::fmt::Debug,
        payload: impl Into<String>,
    ) -> Result<(), StoreError> {
        debug!("Sending request");
        let product_id = product_id.into();
        let payload = payload.into();
        self.request(|respond_to| StoreRequest::Purchase {
            product_id,
            payload,
            respond_to,
        })
        .await
    }

    /// Consumes the unconsumed purchase of `product_id`, if there is one.
    #[instrument(skip(self))]
    pub async fn finish_transaction(
        &self,
        product_id: impl Into<String> + std::fmt::Debug,
    ) -> Result<(), StoreError> {
        debug!("Sending request");
        let product_id = product_id.into();
        self.request(|respond_to| StoreRequest::FinishTransaction {
            product_id,
            respond_to,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        self.request(|respond_to| StoreRequest::Snapshot { respond_to })
            .await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, StoreError>>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
