//! # Store Configuration
//!
//! [`StoreConfig`] can be built in code, deserialized from whatever format the
//! host uses (every field has a default), or read from the environment:
//!
//! ```bash
//! STORE_NAME=AppGallery STORE_REQUEST_BUFFER=64 cargo run
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_STORE_NAME: &str = "AppGallery";
pub const DEFAULT_REQUEST_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Platform name written into receipts.
    pub store_name: String,
    /// Capacity of the store actor's request channel.
    pub request_buffer: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: DEFAULT_STORE_NAME.to_string(),
            request_buffer: DEFAULT_REQUEST_BUFFER,
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `STORE_NAME` and `STORE_REQUEST_BUFFER`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(name) = lookup("STORE_NAME").filter(|name| !name.is_empty()) {
            config.store_name = name;
        }
        if let Some(raw) = lookup("STORE_REQUEST_BUFFER") {
            match raw.parse::<usize>() {
                Ok(buffer) if buffer > 0 => config.request_buffer = buffer,
                _ => warn!(value = %raw, "Ignoring invalid STORE_REQUEST_BUFFER"),
            }
        }
        config
    }

    pub fn with_store_name(mut self, store_name: impl Into<String>) -> Self {
        self.store_name = store_name.into();
        self
    }
}
