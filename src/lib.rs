//! # AppGallery Store
//!
//! > **An in-app purchasing layer for a Huawei-style purchase platform.**
//!
//! The crate sits between a host's commerce code and the platform SDK. It
//! loads a catalog of products and the user's unconsumed purchases, runs
//! purchases through the platform's intent/resolution flow, and consumes
//! finished transactions. Every result reaches the host as an event.
//!
//! ## 🚀 Core Concepts
//!
//! ### One actor owns the state
//! The [`StoreActor`](store_actor::StoreActor) runs in its own Tokio task and
//! handles one message at a time, so the catalog maps need no locks. Platform
//! calls run in spawned tasks and report back as messages; the actor never
//! waits on the network.
//!
//! ### The platform is a trait
//! [`PurchasePlatform`](platform::PurchasePlatform) is the seam to the SDK.
//! Tests use the scripted [`MockPlatform`](platform::mock::MockPlatform).
//!
//! ### Events, not return values
//! Client calls return once the actor has accepted a request. Catalog
//! publication, setup failures and purchase outcomes are delivered through
//! [`StoreEvents`](store_actor::StoreEvents).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`store_actor`])
//! - **Role**: State machine for client lifecycle, catalog gating, purchases and consumption.
//! - **Key items**: [`StoreActor`](store_actor::StoreActor), [`StoreEvents`](store_actor::StoreEvents), [`EventChannel`](store_actor::EventChannel).
//!
//! ### 2. The Loader ([`catalog`])
//! - **Role**: Staged catalog loading (product info then ownership, per class) into a [`CatalogAccumulator`](catalog::CatalogAccumulator).
//!
//! ### 3. The Interface ([`clients`])
//! - **Key items**: [`StoreClient`](clients::StoreClient), [`CommerceStore`](clients::CommerceStore).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`StoreSystem`](lifecycle::StoreSystem), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 5. Supporting modules
//! [`model`] (domain types, price formatting, receipts), [`platform`] (SDK
//! boundary and errors), [`config`] (store name, channel sizing).
//!
//! ## Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod catalog;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod platform;
pub mod store_actor;
