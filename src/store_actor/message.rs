//! # Store Messages
//!
//! Two kinds of messages reach the store actor:
//!
//! - [`StoreRequest`]: public operations sent by a
//!   [`StoreClient`](crate::clients::StoreClient). Each carries a `oneshot`
//!   [`Response`] that is answered as soon as the actor has handled it.
//! - [`Completion`]: results of platform calls, posted back by the tasks the
//!   actor spawned. They are how asynchronous chains rejoin the single writer.

use crate::catalog::{CatalogAccumulator, LoadError};
use crate::model::{ProductRequest, PurchaseFailure, PurchaseResolution};
use crate::platform::ClientError;
use crate::store_actor::{StoreError, StoreEvents, StoreSnapshot};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Public operations of the store.
pub enum StoreRequest {
    Initialize {
        events: Arc<dyn StoreEvents>,
        respond_to: Response<()>,
    },
    RetrieveProducts {
        products: Vec<ProductRequest>,
        respond_to: Response<()>,
    },
    Purchase {
        product_id: String,
        payload: String,
        respond_to: Response<()>,
    },
    FinishTransaction {
        product_id: String,
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<StoreSnapshot>,
    },
}

/// Result of a platform call chain, delivered back to the actor.
#[derive(Debug)]
pub enum Completion {
    ClientReady(Result<(), ClientError>),
    CatalogLoaded(Result<CatalogAccumulator, LoadError>),
    /// `Err` carries a failure that happened before a result code existed.
    PurchaseResolved {
        product_id: String,
        result: Result<PurchaseResolution, PurchaseFailure>,
    },
    Consumed {
        product_id: String,
        token: String,
        result: Result<(), ClientError>,
    },
}
