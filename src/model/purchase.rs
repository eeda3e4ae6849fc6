use crate::model::{OwnershipRecord, ProductClass};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Payload for the platform's create-purchase-intent request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseIntentRequest {
    pub price_type: ProductClass,
    pub product_id: String,
    pub developer_payload: String,
}

/// Platform handle for a purchase awaiting user-facing resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseIntent(pub String);

/// Order status code produced when an intent is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultCode {
    Success,
    AlreadyOwned,
    Cancelled,
    Other(i32),
}

impl ResultCode {
    pub const SUCCESS: i32 = 0;
    pub const CANCELLED: i32 = 60000;
    pub const PRODUCT_OWNED: i32 = 60051;

    /// Maps a raw platform order-status code.
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::SUCCESS => ResultCode::Success,
            Self::CANCELLED => ResultCode::Cancelled,
            Self::PRODUCT_OWNED => ResultCode::AlreadyOwned,
            other => ResultCode::Other(other),
        }
    }
}

/// What the platform returns once an intent has been resolved.
///
/// `purchase` is only expected when `code` is [`ResultCode::Success`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseResolution {
    pub code: ResultCode,
    pub message: String,
    pub purchase: Option<OwnershipRecord>,
}

impl PurchaseResolution {
    pub fn success(purchase: OwnershipRecord) -> Self {
        Self {
            code: ResultCode::Success,
            message: String::new(),
            purchase: Some(purchase),
        }
    }

    pub fn failure(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            purchase: None,
        }
    }
}

/// Why a purchase attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseFailureReason {
    ProductUnavailable,
    AlreadyOwned,
    UserCancelled,
    Unknown,
}

impl PurchaseFailureReason {
    /// Maps a non-success result code to a failure reason.
    pub fn from_result_code(code: ResultCode) -> Self {
        match code {
            ResultCode::AlreadyOwned => PurchaseFailureReason::AlreadyOwned,
            ResultCode::Cancelled => PurchaseFailureReason::UserCancelled,
            ResultCode::Success | ResultCode::Other(_) => PurchaseFailureReason::Unknown,
        }
    }
}

impl Display for PurchaseFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Failure details handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseFailure {
    pub product_id: String,
    pub reason: PurchaseFailureReason,
    pub message: String,
}

impl PurchaseFailure {
    pub fn new(
        product_id: impl Into<String>,
        reason: PurchaseFailureReason,
        message: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            reason,
            message: message.into(),
        }
    }
}

/// Terminal state of one purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseOutcome {
    Succeeded {
        product_id: String,
        signature: String,
        order_id: String,
    },
    Failed(PurchaseFailure),
}

impl PurchaseOutcome {
    pub fn product_id(&self) -> &str {
        match self {
            PurchaseOutcome::Succeeded { product_id, .. } => product_id,
            PurchaseOutcome::Failed(failure) => &failure.product_id,
        }
    }
}

/// Catalog-level failure reported once through the event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupFailure {
    PurchasingUnavailable,
    NoProductsAvailable,
}
