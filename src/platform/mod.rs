//! # Purchase Platform Boundary
//!
//! The store actor never talks to the platform SDK directly. It drives the
//! [`PurchasePlatform`] trait, whose operations are single-purpose and
//! asynchronous. Composing them (staged loading, purchase resolution) is the
//! job of [`crate::catalog`] and [`crate::store_actor`].
//!
//! ## Implementing the trait
//!
//! ```rust
//! use appgallery_store::model::*;
//! use appgallery_store::platform::{ClientError, PurchasePlatform, TransportError};
//! use async_trait::async_trait;
//!
//! struct OfflinePlatform;
//!
//! #[async_trait]
//! impl PurchasePlatform for OfflinePlatform {
//!     async fn ensure_ready(&self) -> Result<(), ClientError> {
//!         Err(ClientError::new(-1, "offline"))
//!     }
//!     async fn fetch_info(&self, _: ProductClass, _: &[String]) -> Result<Vec<ProductInfo>, ClientError> {
//!         Ok(Vec::new())
//!     }
//!     async fn fetch_owned(&self, _: ProductClass) -> Result<Option<Vec<OwnershipRecord>>, ClientError> {
//!         Ok(None)
//!     }
//!     async fn create_intent(&self, _: PurchaseIntentRequest) -> Result<PurchaseIntent, ClientError> {
//!         Err(ClientError::new(-1, "offline"))
//!     }
//!     async fn resolve_intent(&self, _: PurchaseIntent) -> Result<PurchaseResolution, TransportError> {
//!         Err(TransportError::new("offline"))
//!     }
//!     async fn consume(&self, _: &str) -> Result<(), ClientError> {
//!         Err(ClientError::new(-1, "offline"))
//!     }
//! }
//! ```
//!
//! ## Testing
//!
//! See [`mock::MockPlatform`] for a scripted implementation.

pub mod error;
pub mod mock;

pub use error::*;

use crate::model::{
    OwnershipRecord, ProductClass, ProductInfo, PurchaseIntent, PurchaseIntentRequest,
    PurchaseResolution,
};
use async_trait::async_trait;

/// Asynchronous purchase-platform client.
///
/// Implementations are shared between the store actor and the tasks it
/// spawns, so they must be `Send + Sync + 'static`.
#[async_trait]
pub trait PurchasePlatform: Send + Sync + 'static {
    /// Resolves once the platform is ready to take purchase requests.
    async fn ensure_ready(&self) -> Result<(), ClientError>;

    /// Fetches product details for `ids` of one class.
    async fn fetch_info(
        &self,
        class: ProductClass,
        ids: &[String],
    ) -> Result<Vec<ProductInfo>, ClientError>;

    /// Fetches unconsumed purchases of one class.
    /// `Ok(None)` means the platform returned no list at all.
    async fn fetch_owned(
        &self,
        class: ProductClass,
    ) -> Result<Option<Vec<OwnershipRecord>>, ClientError>;

    async fn create_intent(
        &self,
        request: PurchaseIntentRequest,
    ) -> Result<PurchaseIntent, ClientError>;

    /// Runs the user-facing resolution step for an intent.
    async fn resolve_intent(
        &self,
        intent: PurchaseIntent,
    ) -> Result<PurchaseResolution, TransportError>;

    /// Consumes the purchase identified by `token`.
    async fn consume(&self, token: &str) -> Result<(), ClientError>;
}
