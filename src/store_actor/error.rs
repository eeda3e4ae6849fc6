//! Error types for the store actor.

use thiserror::Error;

/// Errors returned by [`StoreClient`](crate::clients::StoreClient) calls.
///
/// Platform failures never show up here; they reach the host as events.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store actor has shut down.
    #[error("Store actor closed")]
    ActorClosed,

    /// The store actor dropped the response channel.
    #[error("Store actor dropped response channel")]
    ActorDropped,

    /// `initialize` must be called before purchasing or finishing a transaction.
    #[error("Store not initialized")]
    NotInitialized,
}
