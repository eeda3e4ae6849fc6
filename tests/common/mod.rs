#![allow(dead_code)]

use appgallery_store::clients::StoreClient;
use appgallery_store::lifecycle::StoreSystem;
use appgallery_store::model::{
    OwnershipRecord, ProductClass, ProductDescription, ProductInfo, ProductRequest,
};
use appgallery_store::platform::mock::MockPlatform;
use appgallery_store::store_actor::{EventChannel, StoreEvent, StoreSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

pub const WAIT: Duration = Duration::from_secs(2);
pub const QUIET: Duration = Duration::from_millis(100);

pub fn catalog() -> Vec<ProductRequest> {
    vec![
        ProductRequest::new("gems_100", ProductClass::Consumable),
        ProductRequest::new("vip", ProductClass::Subscription),
    ]
}

pub fn gems() -> ProductInfo {
    ProductInfo::new("gems_100", ProductClass::Consumable, 990_000, "USD")
        .with_name("100 Gems")
        .with_description("A pouch of gems")
}

pub fn vip() -> ProductInfo {
    ProductInfo::new("vip", ProductClass::Subscription, 150_000_000, "USD").with_name("VIP")
}

pub fn record(product_id: &str, n: u32) -> OwnershipRecord {
    OwnershipRecord::new(
        product_id,
        format!("token-{}", n),
        format!("order-{}", n),
        format!("sig-{}", n),
    )
}

/// Scripts a successful load of [`catalog`] with `owned` as the consumable ownership list.
pub fn script_catalog(mock: &MockPlatform, owned: Vec<OwnershipRecord>) {
    mock.expect_fetch_info(ProductClass::Consumable)
        .return_ok(vec![gems()]);
    mock.expect_fetch_owned(ProductClass::Consumable)
        .return_ok(Some(owned));
    mock.expect_fetch_info(ProductClass::Subscription)
        .return_ok(vec![vip()]);
    mock.expect_fetch_owned(ProductClass::Subscription)
        .return_ok(None);
}

pub fn start(mock: &MockPlatform) -> (StoreSystem, Arc<EventChannel>, UnboundedReceiver<StoreEvent>) {
    let system = StoreSystem::new(Arc::new(mock.clone()));
    let (events, receiver) = EventChannel::new();
    (system, Arc::new(events), receiver)
}

/// A store with the client ready and [`catalog`] published.
pub async fn ready_store(
    mock: &MockPlatform,
    owned: Vec<OwnershipRecord>,
) -> (StoreSystem, UnboundedReceiver<StoreEvent>, Vec<ProductDescription>) {
    mock.expect_ensure_ready().return_ok(());
    script_catalog(mock, owned);

    let (system, events, mut receiver) = start(mock);
    system.client.initialize(events).await.unwrap();
    system.client.retrieve_products(catalog()).await.unwrap();

    match next_event(&mut receiver).await {
        StoreEvent::ProductsRetrieved(products) => (system, receiver, products),
        other => panic!("Expected ProductsRetrieved, got {:?}", other),
    }
}

pub async fn next_event(receiver: &mut UnboundedReceiver<StoreEvent>) -> StoreEvent {
    tokio::time::timeout(WAIT, receiver.recv())
        .await
        .expect("Timed out waiting for a store event")
        .expect("Event channel closed")
}

pub async fn assert_no_event(receiver: &mut UnboundedReceiver<StoreEvent>) {
    if let Ok(Some(event)) = tokio::time::timeout(QUIET, receiver.recv()).await {
        panic!("Unexpected store event: {:?}", event);
    }
}

/// Polls snapshots until `condition` holds.
pub async fn wait_for(client: &StoreClient, condition: impl Fn(&StoreSnapshot) -> bool) -> StoreSnapshot {
    let polling = async {
        loop {
            let snapshot = client.snapshot().await.unwrap();
            if condition(&snapshot) {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    tokio::time::timeout(WAIT, polling)
        .await
        .expect("Timed out waiting for store state")
}
