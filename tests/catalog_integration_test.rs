use crop_advisor::catalog::{CatalogFetcher, CatalogProvider, CatalogSource};
use crop_advisor::config::CatalogConfig;
use crop_advisor::error::AppError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, ttl_seconds: u64, max_retries: u32) -> CatalogConfig {
    CatalogConfig {
        api_url: Some(format!("{}/crops", server.uri())),
        api_key: Some("test-key".to_string()),
        cache_ttl_seconds: ttl_seconds,
        timeout_seconds: 5,
        max_retries,
    }
}

fn remote_catalog() -> serde_json::Value {
    json!({
        "data": [
            {"name": "Wheat", "price": "2600"},
            {
                "crop": "Barley",
                "category": "Cereals",
                "min_temp": 12,
                "max_temp": 25,
                "min_rainfall": "300",
                "max_rainfall": 700,
                "ph_min": 6.0,
                "ph_max": 8.0,
                "growing_season": "Rabi (Nov-Mar)",
                "water": "Low",
                "price": 1900,
                "cost": 17000,
                "yield": 20,
                "duration_days": 120
            },
            {"name": "Unheard Of"}
        ]
    })
}

/// Test that the provider sends credentials and normalizes the remote catalog
#[tokio::test]
async fn test_remote_catalog_is_fetched_and_normalized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("x-api-key", "test-key"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_catalog()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = CatalogProvider::from_config(&config_for(&mock_server, 900, 0))
        .expect("Failed to create provider");
    assert!(provider.is_remote());

    let snapshot = provider.snapshot(false).await;
    assert_eq!(snapshot.source, CatalogSource::Remote);

    let names: Vec<&str> = snapshot.crops.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Wheat", "Barley"]);

    let wheat = &snapshot.crops[0];
    assert_eq!(wheat.economics.market_price, 2600.0);
    // Everything else comes from the static entry
    assert_eq!(wheat.economics.production_cost, 25000.0);

    let barley = &snapshot.crops[1];
    assert_eq!(barley.rainfall.min, 300.0);
    assert_eq!(barley.growing_period_days, 120);
}

/// Test that a bare JSON array body is accepted
#[tokio::test]
async fn test_bare_array_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"crop_name": "Maize", "marketPrice": 2100}])),
        )
        .mount(&mock_server)
        .await;

    let fetcher = CatalogFetcher::new(&config_for(&mock_server, 900, 0)).unwrap();
    let items = fetcher.fetch_items().await.unwrap();
    assert_eq!(items.len(), 1);
}

/// Test that a server error falls back to the static catalog
#[tokio::test]
async fn test_server_error_falls_back_to_static() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let provider = CatalogProvider::from_config(&config_for(&mock_server, 900, 0)).unwrap();
    let snapshot = provider.snapshot(false).await;

    assert_eq!(snapshot.source, CatalogSource::Static);
    assert_eq!(snapshot.crops.len(), 16);
}

/// Test that the fetcher surfaces the HTTP error to its caller
#[tokio::test]
async fn test_fetcher_reports_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let fetcher = CatalogFetcher::new(&config_for(&mock_server, 900, 3)).unwrap();
    match fetcher.fetch_items().await {
        Err(AppError::Http(e)) => assert_eq!(e.status().map(|s| s.as_u16()), Some(404)),
        other => panic!("Expected Http error, got: {:?}", other),
    }
}

/// Test that malformed JSON falls back to the static catalog
#[tokio::test]
async fn test_invalid_json_falls_back_to_static() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let provider = CatalogProvider::from_config(&config_for(&mock_server, 900, 0)).unwrap();
    assert_eq!(provider.snapshot(false).await.source, CatalogSource::Static);
}

/// Test retry logic with a transient failure
#[tokio::test]
async fn test_retries_on_server_error() {
    let mock_server = MockServer::start().await;

    // First request fails with 503, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_catalog()))
        .mount(&mock_server)
        .await;

    let provider = CatalogProvider::from_config(&config_for(&mock_server, 900, 1)).unwrap();
    let snapshot = provider.snapshot(false).await;
    assert_eq!(snapshot.source, CatalogSource::Remote);
    assert_eq!(snapshot.crops.len(), 2);
}

/// Test that an empty remote list yields the static catalog
#[tokio::test]
async fn test_empty_remote_list_uses_static_crops() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    let provider = CatalogProvider::from_config(&config_for(&mock_server, 900, 0)).unwrap();
    assert_eq!(provider.snapshot(false).await.crops.len(), 16);
}

/// Test that a fresh snapshot is served from the cache
#[tokio::test]
async fn test_cache_hit_within_ttl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_catalog()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = CatalogProvider::from_config(&config_for(&mock_server, 900, 0)).unwrap();
    let first = provider.snapshot(false).await;
    let second = provider.snapshot(false).await;

    assert!(Arc::ptr_eq(&first.crops, &second.crops));
    assert_eq!(first.fetched_at, second.fetched_at);
}

/// Test that a forced refresh bypasses a fresh cache entry
#[tokio::test]
async fn test_force_refresh_refetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_catalog()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let provider = CatalogProvider::from_config(&config_for(&mock_server, 900, 0)).unwrap();
    let first = provider.snapshot(false).await;
    let forced = provider.snapshot(true).await;

    assert!(!Arc::ptr_eq(&first.crops, &forced.crops));
}

/// Test that an expired entry is refetched
#[tokio::test]
async fn test_expired_entry_refetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_catalog()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let provider = CatalogProvider::from_config(&config_for(&mock_server, 0, 0)).unwrap();
    provider.snapshot(false).await;
    provider.snapshot(false).await;
}

/// Test that concurrent cold callers trigger a single fetch
#[tokio::test]
async fn test_concurrent_cold_start_fetches_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crops"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(remote_catalog())
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Arc::new(CatalogProvider::from_config(&config_for(&mock_server, 900, 0)).unwrap());

    let mut handles = Vec::new();
    for _ in 0..10 {
        let provider = Arc::clone(&provider);
        handles.push(tokio::spawn(async move { provider.snapshot(false).await }));
    }

    for handle in handles {
        let snapshot = handle.await.unwrap();
        assert_eq!(snapshot.source, CatalogSource::Remote);
        assert_eq!(snapshot.crops.len(), 2);
    }
}
