//! Host-facing handles to the store actor.

pub mod commerce_store;
pub mod store_client;

pub use commerce_store::CommerceStore;
pub use store_client::StoreClient;
