//! # CommerceStore Trait
//!
//! The operation surface a host's commerce layer codes against. Code written
//! against `CommerceStore` can be handed a [`StoreClient`] in production and a
//! test double elsewhere.

use crate::clients::StoreClient;
use crate::model::ProductRequest;
use crate::store_actor::{StoreError, StoreEvents};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait CommerceStore: Send + Sync {
    async fn initialize(&self, events: Arc<dyn StoreEvents>) -> Result<(), StoreError>;

    async fn retrieve_products(&self, products: Vec<ProductRequest>) -> Result<(), StoreError>;

    async fn purchase(&self, product_id: &str, developer_payload: &str) -> Result<(), StoreError>;

    async fn finish_transaction(&self, product_id: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl CommerceStore for StoreClient {
    async fn initialize(&self, events: Arc<dyn StoreEvents>) -> Result<(), StoreError> {
        StoreClient::initialize(self, events).await
    }

    async fn retrieve_products(&self, products: Vec<ProductRequest>) -> Result<(), StoreError> {
        StoreClient::retrieve_products(self, products).await
    }

    async fn purchase(&self, product_id: &str, developer_payload: &str) -> Result<(), StoreError> {
        StoreClient::purchase(self, product_id, developer_payload).await
    }

    async fn finish_transaction(&self, product_id: &str) -> Result<(), StoreError> {
        StoreClient::finish_transaction(self, product_id).await
    }
}
