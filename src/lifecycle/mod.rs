//! # Store Lifecycle
//!
//! Starting and stopping the store, plus the tracing setup hosts call once at
//! startup.
//!
//! ```rust,no_run
//! use appgallery_store::lifecycle::{setup_tracing, StoreSystem};
//! use appgallery_store::platform::mock::MockPlatform;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     setup_tracing();
//!     let system = StoreSystem::new(Arc::new(MockPlatform::new()));
//!     // ... drive system.client ...
//!     system.shutdown().await
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client**: closes the request channel
//! 2. **Actor detects closure**: `receiver.recv()` returns `None`
//! 3. **Actor logs its final state** and exits
//! 4. **Await completion**: the task handle is joined
//!
//! Clones of the client held elsewhere keep the actor alive, so drop them
//! before calling `shutdown`. Platform calls still in flight when the actor
//! exits finish on their own and their results are discarded.

pub mod store_system;
pub mod tracing;

pub use store_system::*;
pub use tracing::*;
