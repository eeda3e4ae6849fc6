//! # Store Actor
//!
//! The store's state machine, running as a Tokio actor.
//!
//! ```text
//! StoreClient ──StoreRequest──▶ StoreActor ──spawn──▶ platform call chain
//!                                   ▲                        │
//!                                   └──────Completion────────┘
//! ```
//!
//! Use [`new`] to create the actor and its client, then spawn [`StoreActor::run`].
//! [`crate::lifecycle::StoreSystem`] does both for you.

pub mod actor;
pub mod error;
pub mod events;
pub mod message;
pub mod state;

pub use actor::StoreActor;
pub use error::StoreError;
pub use events::{EventChannel, StoreEvent, StoreEvents};
pub use message::{Completion, Response, StoreRequest};
pub use state::{CatalogStatus, ClientState, StoreSnapshot};

use crate::clients::StoreClient;
use crate::config::StoreConfig;
use crate::platform::PurchasePlatform;
use std::sync::Arc;

/// Creates a new store actor and client.
pub fn new<P: PurchasePlatform>(platform: Arc<P>, config: StoreConfig) -> (StoreActor<P>, StoreClient) {
    StoreActor::new(platform, config)
}
