mod common;

use appgallery_store::model::{ProductClass, ProductRequest, SetupFailure};
use appgallery_store::platform::mock::{MockPlatform, PlatformCall};
use appgallery_store::platform::ClientError;
use appgallery_store::config::StoreConfig;
use appgallery_store::lifecycle::StoreSystem;
use appgallery_store::store_actor::{CatalogStatus, ClientState, EventChannel, StoreEvent};
use std::sync::Arc;
use common::*;

#[tokio::test]
async fn test_catalog_published_after_initialize() {
    let mock = MockPlatform::new();
    let (system, mut receiver, products) = ready_store(&mock, vec![record("gems_100", 1)]).await;

    let ids: Vec<&str> = products.iter().map(|p| p.product_id.as_str()).collect();
    assert_eq!(ids, vec!["gems_100", "vip"]);

    let gems = &products[0];
    assert_eq!(gems.metadata.localized_price_string, "USD 0.99");
    assert_eq!(gems.metadata.title, "100 Gems");
    assert_eq!(gems.metadata.description, "A pouch of gems");
    assert_eq!(gems.metadata.currency_code, "USD");
    assert_eq!(gems.metadata.localized_price, 0.99);
    assert_eq!(
        gems.receipt.as_deref(),
        Some(r#"{"Store":"AppGallery","TransactionID":"order-1", "Payload":{ "product":"gems_100"}}"#)
    );
    assert_eq!(gems.transaction_id.as_deref(), Some("order-1"));

    let vip = &products[1];
    assert_eq!(vip.metadata.localized_price_string, "USD 150");
    assert_eq!(vip.receipt, None);
    assert_eq!(vip.transaction_id, None);

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.client_state, ClientState::ClientReady);
    assert_eq!(snapshot.catalog_status, CatalogStatus::Published);
    assert!(snapshot.catalog_requested);
    assert_eq!(snapshot.catalog.product_count(), 2);
    assert_eq!(snapshot.catalog.owned_count(), 1);

    assert_no_event(&mut receiver).await;
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_request_before_initialize_waits_for_client() {
    let mock = MockPlatform::new();
    mock.expect_ensure_ready().return_ok(());
    script_catalog(&mock, vec![]);
    let (system, events, mut receiver) = start(&mock);

    system.client.retrieve_products(catalog()).await.unwrap();

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.client_state, ClientState::Uninitialized);
    assert_eq!(snapshot.catalog_status, CatalogStatus::Idle);
    assert!(snapshot.catalog_requested);
    assert!(mock.calls().is_empty());

    system.client.initialize(events).await.unwrap();

    match next_event(&mut receiver).await {
        StoreEvent::ProductsRetrieved(products) => assert_eq!(products.len(), 2),
        other => panic!("Expected ProductsRetrieved, got {:?}", other),
    }
    assert_eq!(mock.calls()[0], PlatformCall::EnsureReady);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_load_calls_follow_class_order() {
    let mock = MockPlatform::new();
    let (system, _receiver, _) = ready_store(&mock, vec![]).await;

    assert_eq!(
        mock.calls(),
        vec![
            PlatformCall::EnsureReady,
            PlatformCall::FetchInfo {
                class: ProductClass::Consumable,
                ids: vec!["gems_100".to_string()],
            },
            PlatformCall::FetchOwned {
                class: ProductClass::Consumable
            },
            PlatformCall::FetchInfo {
                class: ProductClass::Subscription,
                ids: vec!["vip".to_string()],
            },
            PlatformCall::FetchOwned {
                class: ProductClass::Subscription
            },
        ]
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_catalog_publishes_without_fetching() {
    let mock = MockPlatform::new();
    mock.expect_ensure_ready().return_ok(());
    let (system, events, mut receiver) = start(&mock);

    system.client.initialize(events).await.unwrap();
    system.client.retrieve_products(Vec::new()).await.unwrap();

    assert_eq!(
        next_event(&mut receiver).await,
        StoreEvent::ProductsRetrieved(Vec::new())
    );
    assert_eq!(mock.count_calls(PlatformCall::is_fetch), 0);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_client_failure_reports_purchasing_unavailable() {
    let mock = MockPlatform::new();
    mock.expect_ensure_ready()
        .return_err(ClientError::new(6, "HMS core missing"));
    let (system, events, mut receiver) = start(&mock);

    system.client.initialize(events).await.unwrap();
    system.client.retrieve_products(catalog()).await.unwrap();

    assert_eq!(
        next_event(&mut receiver).await,
        StoreEvent::SetupFailed(SetupFailure::PurchasingUnavailable)
    );
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.client_state, ClientState::ClientFailed);
    assert_eq!(snapshot.catalog_status, CatalogStatus::Idle);

    assert_no_event(&mut receiver).await;
    assert_eq!(mock.count_calls(PlatformCall::is_fetch), 0);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reinitialize_after_client_failure_loads_catalog() {
    let mock = MockPlatform::new();
    mock.expect_ensure_ready()
        .return_err(ClientError::new(6, "HMS core missing"));
    let (system, events, mut receiver) = start(&mock);

    system.client.retrieve_products(catalog()).await.unwrap();
    system.client.initialize(events.clone()).await.unwrap();
    assert_eq!(
        next_event(&mut receiver).await,
        StoreEvent::SetupFailed(SetupFailure::PurchasingUnavailable)
    );

    mock.expect_ensure_ready().return_ok(());
    script_catalog(&mock, vec![]);
    system.client.initialize(events).await.unwrap();

    assert!(matches!(
        next_event(&mut receiver).await,
        StoreEvent::ProductsRetrieved(products) if products.len() == 2
    ));
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_info_failure_halts_load_and_reports_once() {
    let mock = MockPlatform::new();
    mock.expect_ensure_ready().return_ok(());
    mock.expect_fetch_info(ProductClass::Consumable)
        .return_err(ClientError::new(1, "no network"));
    let (system, events, mut receiver) = start(&mock);

    system.client.initialize(events).await.unwrap();
    system.client.retrieve_products(catalog()).await.unwrap();

    assert_eq!(
        next_event(&mut receiver).await,
        StoreEvent::SetupFailed(SetupFailure::NoProductsAvailable)
    );
    assert_no_event(&mut receiver).await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.catalog_status, CatalogStatus::Failed);
    assert_eq!(snapshot.catalog.product_count(), 0);
    assert_eq!(mock.count_calls(PlatformCall::is_fetch), 1);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reinitialize_after_failed_load_retries() {
    let mock = MockPlatform::new();
    mock.expect_ensure_ready().return_ok(());
    mock.expect_fetch_info(ProductClass::Consumable)
        .return_err(ClientError::new(1, "no network"));
    let (system, events, mut receiver) = start(&mock);

    system.client.initialize(events.clone()).await.unwrap();
    system.client.retrieve_products(catalog()).await.unwrap();
    assert_eq!(
        next_event(&mut receiver).await,
        StoreEvent::SetupFailed(SetupFailure::NoProductsAvailable)
    );

    // A new catalog request is ignored until the failed run is reset.
    system
        .client
        .retrieve_products(vec![ProductRequest::new("other", ProductClass::Consumable)])
        .await
        .unwrap();

    mock.expect_ensure_ready().return_ok(());
    script_catalog(&mock, vec![]);
    system.client.initialize(events).await.unwrap();

    match next_event(&mut receiver).await {
        StoreEvent::ProductsRetrieved(products) => {
            let ids: Vec<&str> = products.iter().map(|p| p.product_id.as_str()).collect();
            assert_eq!(ids, vec!["gems_100", "vip"]);
        }
        other => panic!("Expected ProductsRetrieved, got {:?}", other),
    }
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ownership_failure_publishes_without_receipts() {
    let mock = MockPlatform::new();
    mock.expect_ensure_ready().return_ok(());
    mock.expect_fetch_info(ProductClass::Consumable)
        .return_ok(vec![gems()]);
    mock.expect_fetch_owned(ProductClass::Consumable)
        .return_err(ClientError::new(2, "owned query failed"));
    let (system, events, mut receiver) = start(&mock);

    system.client.initialize(events).await.unwrap();
    system
        .client
        .retrieve_products(vec![ProductRequest::new("gems_100", ProductClass::Consumable)])
        .await
        .unwrap();

    match next_event(&mut receiver).await {
        StoreEvent::ProductsRetrieved(products) => {
            assert_eq!(products.len(), 1);
            assert_eq!(products[0].receipt, None);
        }
        other => panic!("Expected ProductsRetrieved, got {:?}", other),
    }
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_repeated_requests_are_ignored_after_publish() {
    let mock = MockPlatform::new();
    let (system, mut receiver, _) = ready_store(&mock, vec![]).await;
    let (events, _unused) = EventChannel::new();

    system.client.retrieve_products(catalog()).await.unwrap();
    system
        .client
        .initialize(Arc::new(events))
        .await
        .unwrap();

    assert_no_event(&mut receiver).await;
    assert_eq!(mock.count_calls(|call| *call == PlatformCall::EnsureReady), 1);
    assert_eq!(mock.count_calls(PlatformCall::is_fetch), 4);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_configured_store_name_in_receipts() {
    let mock = MockPlatform::new();
    mock.expect_ensure_ready().return_ok(());
    script_catalog(&mock, vec![record("gems_100", 4)]);
    let config = StoreConfig::default().with_store_name("TestGallery");
    let system = StoreSystem::with_config(Arc::new(mock.clone()), config);
    let (events, mut receiver) = EventChannel::new();

    system.client.initialize(Arc::new(events)).await.unwrap();
    system.client.retrieve_products(catalog()).await.unwrap();

    match next_event(&mut receiver).await {
        StoreEvent::ProductsRetrieved(products) => assert_eq!(
            products[0].receipt.as_deref(),
            Some(r#"{"Store":"TestGallery","TransactionID":"order-4", "Payload":{ "product":"gems_100"}}"#)
        ),
        other => panic!("Expected ProductsRetrieved, got {:?}", other),
    }
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_closes_client() {
    let mock = MockPlatform::new();
    let (system, _events, _receiver) = start(&mock);
    let client = system.client.clone();
    drop(client);

    assert!(system.shutdown().await.is_ok());
}
