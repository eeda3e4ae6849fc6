//! # Store Events
//!
//! Everything the host learns asynchronously arrives through [`StoreEvents`].
//! Hosts that would rather pull events than implement callbacks can use
//! [`EventChannel`], which forwards each callback as a [`StoreEvent`].

use crate::model::{ProductDescription, PurchaseFailure, PurchaseOutcome, SetupFailure};
use tokio::sync::mpsc;

/// Callback sink supplied to `initialize`.
///
/// Callbacks run on the store actor's task and should return quickly.
pub trait StoreEvents: Send + Sync {
    fn on_setup_failed(&self, reason: SetupFailure);

    /// Fired at most once per store, after the first complete catalog load.
    fn on_products_retrieved(&self, products: Vec<ProductDescription>);

    fn on_purchase_succeeded(&self, product_id: &str, signature: &str, order_id: &str);

    fn on_purchase_failed(&self, failure: PurchaseFailure);
}

/// A store callback captured as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    SetupFailed(SetupFailure),
    ProductsRetrieved(Vec<ProductDescription>),
    Purchase(PurchaseOutcome),
}

/// [`StoreEvents`] implementation that forwards into an unbounded channel.
#[derive(Debug, Clone)]
pub struct EventChannel {
    sender: mpsc::UnboundedSender<StoreEvent>,
}

impl EventChannel {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StoreEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn forward(&self, event: StoreEvent) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.sender.send(event);
    }
}

impl StoreEvents for EventChannel {
    fn on_setup_failed(&self, reason: SetupFailure) {
        self.forward(StoreEvent::SetupFailed(reason));
    }

    fn on_products_retrieved(&self, products: Vec<ProductDescription>) {
        self.forward(StoreEvent::ProductsRetrieved(products));
    }

    fn on_purchase_succeeded(&self, product_id: &str, signature: &str, order_id: &str) {
        self.forward(StoreEvent::Purchase(PurchaseOutcome::Succeeded {
            product_id: product_id.to_string(),
            signature: signature.to_string(),
            order_id: order_id.to_string(),
        }));
    }

    fn on_purchase_failed(&self, failure: PurchaseFailure) {
        self.forward(StoreEvent::Purchase(PurchaseOutcome::Failed(failure)));
    }
}
