//! # Platform Errors
//!
//! Typed errors at the purchase-platform boundary. The platform SDK reports
//! failures as exceptions carrying a status code and nested messages; a
//! [`PurchasePlatform`](crate::platform::PurchasePlatform) implementation flattens
//! them into these types so SDK error types never reach the store actor.

use thiserror::Error;

/// A platform request failed before producing a result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Platform error {code}: {message}")]
pub struct ClientError {
    pub code: i32,
    pub message: String,
}

impl ClientError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Intent resolution broke down before a result code was produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Resolution failed: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
