//! # Mock Platform
//!
//! A scripted [`PurchasePlatform`] for tests. Responses are queued up front with
//! a fluent builder and handed out when the store makes the matching call.
//!
//! ```rust
//! use appgallery_store::model::{ProductClass, ProductInfo};
//! use appgallery_store::platform::mock::MockPlatform;
//! use appgallery_store::platform::PurchasePlatform;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockPlatform::new();
//!     mock.expect_fetch_info(ProductClass::Consumable)
//!         .return_ok(vec![ProductInfo::new("coins", ProductClass::Consumable, 990_000, "USD")]);
//!
//!     let infos = mock
//!         .fetch_info(ProductClass::Consumable, &["coins".to_string()])
//!         .await
//!         .unwrap();
//!     assert_eq!(infos.len(), 1);
//!     mock.verify();
//! }
//! ```
//!
//! ## Matching
//!
//! Each call takes the *oldest* queued expectation of the same kind whose key
//! matches (class for fetches, product id for intents, intent for resolution,
//! token for consume). Calls from independent chains can therefore interleave
//! freely. A call without a matching expectation is logged as unexpected,
//! answered with an error, and makes [`MockPlatform::verify`] panic.
//!
//! ## Holding a response
//!
//! [`ExpectationBuilder::after`] parks the response until a `oneshot` gate is
//! released (or dropped). Use it to keep a load or purchase in flight while
//! the test drives other operations.

use crate::model::{
    OwnershipRecord, ProductClass, ProductInfo, PurchaseIntent, PurchaseIntentRequest,
    PurchaseResolution,
};
use crate::platform::{ClientError, PurchasePlatform, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Code used for errors returned to unexpected calls.
pub const UNEXPECTED_CALL_CODE: i32 = -999;

/// A call observed by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    EnsureReady,
    FetchInfo { class: ProductClass, ids: Vec<String> },
    FetchOwned { class: ProductClass },
    CreateIntent(PurchaseIntentRequest),
    ResolveIntent(PurchaseIntent),
    Consume { token: String },
}

impl PlatformCall {
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            PlatformCall::FetchInfo { .. } | PlatformCall::FetchOwned { .. }
        )
    }
}

enum Expectation {
    EnsureReady {
        response: Result<(), ClientError>,
    },
    FetchInfo {
        class: ProductClass,
        response: Result<Vec<ProductInfo>, ClientError>,
    },
    FetchOwned {
        class: ProductClass,
        response: Result<Option<Vec<OwnershipRecord>>, ClientError>,
    },
    CreateIntent {
        product_id: String,
        response: Result<PurchaseIntent, ClientError>,
    },
    ResolveIntent {
        intent: PurchaseIntent,
        response: Result<PurchaseResolution, TransportError>,
    },
    Consume {
        token: String,
        response: Result<(), ClientError>,
    },
}

impl Expectation {
    fn matches(&self, call: &PlatformCall) -> bool {
        match (self, call) {
            (Expectation::EnsureReady { .. }, PlatformCall::EnsureReady) => true,
            (Expectation::FetchInfo { class, .. }, PlatformCall::FetchInfo { class: c, .. }) => {
                class == c
            }
            (Expectation::FetchOwned { class, .. }, PlatformCall::FetchOwned { class: c }) => {
                class == c
            }
            (Expectation::CreateIntent { product_id, .. }, PlatformCall::CreateIntent(req)) => {
                *product_id == req.product_id
            }
            (Expectation::ResolveIntent { intent, .. }, PlatformCall::ResolveIntent(i)) => {
                intent == i
            }
            (Expectation::Consume { token, .. }, PlatformCall::Consume { token: t }) => token == t,
            _ => false,
        }
    }
}

struct Scripted {
    expectation: Expectation,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Scripted>,
    calls: Vec<PlatformCall>,
    unexpected: Vec<PlatformCall>,
}

/// Scripted platform with expectation tracking.
///
/// Cloning shares the script and the call log, so a test can hand one clone
/// to the store and keep another for assertions.
#[derive(Clone, Default)]
pub struct MockPlatform {
    state: Arc<Mutex<MockState>>,
}

impl MockPlatform {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_ensure_ready(&self) -> ExpectationBuilder<(), ClientError> {
        self.builder(|response| Expectation::EnsureReady { response })
    }

    pub fn expect_fetch_info(
        &self,
        class: ProductClass,
    ) -> ExpectationBuilder<Vec<ProductInfo>, ClientError> {
        self.builder(move |response| Expectation::FetchInfo { class, response })
    }

    pub fn expect_fetch_owned(
        &self,
        class: ProductClass,
    ) -> ExpectationBuilder<Option<Vec<OwnershipRecord>>, ClientError> {
        self.builder(move |response| Expectation::FetchOwned { class, response })
    }

    pub fn expect_create_intent(
        &self,
        product_id: impl Into<String>,
    ) -> ExpectationBuilder<PurchaseIntent, ClientError> {
        let product_id = product_id.into();
        self.builder(move |response| Expectation::CreateIntent {
            product_id,
            response,
        })
    }

    pub fn expect_resolve_intent(
        &self,
        intent: PurchaseIntent,
    ) -> ExpectationBuilder<PurchaseResolution, TransportError> {
        self.builder(move |response| Expectation::ResolveIntent { intent, response })
    }

    pub fn expect_consume(
        &self,
        token: impl Into<String>,
    ) -> ExpectationBuilder<(), ClientError> {
        let token = token.into();
        self.builder(move |response| Expectation::Consume { token, response })
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of calls received so far that satisfy `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&PlatformCall) -> bool) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    /// Verifies that every expectation was consumed and no call was unexpected.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.unexpected.is_empty() {
            panic!("Unexpected platform calls: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn builder<T, E>(
        &self,
        make: impl FnOnce(Result<T, E>) -> Expectation + Send + 'static,
    ) -> ExpectationBuilder<T, E> {
        ExpectationBuilder {
            state: self.state.clone(),
            gate: None,
            make: Box::new(make),
        }
    }

    fn take(&self, call: PlatformCall) -> Option<Scripted> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        let position = state
            .expectations
            .iter()
            .position(|scripted| scripted.expectation.matches(&call));
        match position {
            Some(index) => state.expectations.remove(index),
            None => {
                state.unexpected.push(call);
                None
            }
        }
    }
}

/// Builder for one queued response.
pub struct ExpectationBuilder<T, E> {
    state: Arc<Mutex<MockState>>,
    gate: Option<oneshot::Receiver<()>>,
    make: Box<dyn FnOnce(Result<T, E>) -> Expectation + Send>,
}

impl<T, E> ExpectationBuilder<T, E> {
    /// Holds the response until `gate` is released or its sender dropped.
    pub fn after(mut self, gate: oneshot::Receiver<()>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: E) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, E>) {
        let expectation = (self.make)(response);
        self.state.lock().unwrap().expectations.push_back(Scripted {
            expectation,
            gate: self.gate,
        });
    }
}

async fn hold(gate: Option<oneshot::Receiver<()>>) {
    if let Some(gate) = gate {
        let _ = gate.await;
    }
}

fn unexpected(call: &str) -> ClientError {
    ClientError::new(UNEXPECTED_CALL_CODE, format!("unexpected {} call", call))
}

#[async_trait]
impl PurchasePlatform for MockPlatform {
    async fn ensure_ready(&self) -> Result<(), ClientError> {
        match self.take(PlatformCall::EnsureReady) {
            Some(Scripted {
                expectation: Expectation::EnsureReady { response },
                gate,
            }) => {
                hold(gate).await;
                response
            }
            _ => Err(unexpected("ensure_ready")),
        }
    }

    async fn fetch_info(
        &self,
        class: ProductClass,
        ids: &[String],
    ) -> Result<Vec<ProductInfo>, ClientError> {
        let call = PlatformCall::FetchInfo {
            class,
            ids: ids.to_vec(),
        };
        match self.take(call) {
            Some(Scripted {
                expectation: Expectation::FetchInfo { response, .. },
                gate,
            }) => {
                hold(gate).await;
                response
            }
            _ => Err(unexpected("fetch_info")),
        }
    }

    async fn fetch_owned(
        &self,
        class: ProductClass,
    ) -> Result<Option<Vec<OwnershipRecord>>, ClientError> {
        match self.take(PlatformCall::FetchOwned { class }) {
            Some(Scripted {
                expectation: Expectation::FetchOwned { response, .. },
                gate,
            }) => {
                hold(gate).await;
                response
            }
            _ => Err(unexpected("fetch_owned")),
        }
    }

    async fn create_intent(
        &self,
        request: PurchaseIntentRequest,
    ) -> Result<PurchaseIntent, ClientError> {
        match self.take(PlatformCall::CreateIntent(request)) {
            Some(Scripted {
                expectation: Expectation::CreateIntent { response, .. },
                gate,
            }) => {
                hold(gate).await;
                response
            }
            _ => Err(unexpected("create_intent")),
        }
    }

    async fn resolve_intent(
        &self,
        intent: PurchaseIntent,
    ) -> Result<PurchaseResolution, TransportError> {
        match self.take(PlatformCall::ResolveIntent(intent)) {
            Some(Scripted {
                expectation: Expectation::ResolveIntent { response, .. },
                gate,
            }) => {
                hold(gate).await;
                response
            }
            _ => Err(TransportError::new("unexpected resolve_intent call")),
        }
    }

    async fn consume(&self, token: &str) -> Result<(), ClientError> {
        let call = PlatformCall::Consume {
            token: token.to_string(),
        };
        match self.take(call) {
            Some(Scripted {
                expectation: Expectation::Consume { response, .. },
                gate,
            }) => {
                hold(gate).await;
                response
            }
            _ => Err(unexpected("consume")),
        }
    }
}
