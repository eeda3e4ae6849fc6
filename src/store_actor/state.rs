use crate::catalog::CatalogAccumulator;

/// Lifecycle of the platform client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Uninitialized,
    ClientStarting,
    ClientReady,
    ClientFailed,
}

/// Progress of the store's single catalog load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    /// No run has started yet (or the last one failed and the client was re-initialized).
    Idle,
    Loading,
    /// The last run halted; `initialize` again to retry.
    Failed,
    Published,
}

impl CatalogStatus {
    /// Whether a run is in flight or has already finished.
    pub fn run_started(self) -> bool {
        !matches!(self, CatalogStatus::Idle)
    }
}

/// Consistent copy of the store's state, taken between two messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub client_state: ClientState,
    pub catalog_status: CatalogStatus,
    pub catalog_requested: bool,
    pub catalog: CatalogAccumulator,
}
