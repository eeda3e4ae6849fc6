//! Catalog accumulation and the staged loader that fills it.

pub mod accumulator;
pub mod loader;

pub use accumulator::CatalogAccumulator;
pub use loader::{CatalogLoader, LoadError, LoadState};
