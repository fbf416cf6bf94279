//! Integration tests for `ProductStore::load` over HTTP.
//!
//! Uses `wiremock` to serve the three category documents from a local
//! server so no real network traffic is made.

use arise_catalog::{default_sources, CatalogClient, CatalogError, ProductStore};
use arise_core::{BrandTable, Category};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 5-second timeout, descriptive UA, no retries.
fn test_client() -> CatalogClient {
    CatalogClient::new(5, "arise-test/0.1", 0, 0).expect("failed to build test CatalogClient")
}

fn men_json() -> serde_json::Value {
    json!([
        {
            "name": "Nike Dunk Low Panda",
            "brand": "Nike",
            "price": 2499,
            "category": "men",
            "sizes": ["8", "9"],
            "image": "images/dunk.webp",
            "isNew": true
        },
        {
            "name": "New Balance 550",
            "brand": "new-balance",
            "price": "₹3,199",
            "category": "men",
            "image": "images/550.webp"
        }
    ])
}

fn unisex_json() -> serde_json::Value {
    json!({
        "products": [
            {
                "name": "Air Jordan 1 Chicago",
                "brand": "Air Jordan",
                "price": 5999,
                "category": "unisex",
                "image": "images/aj1.webp"
            },
            { "name": "Broken record without price", "image": "images/x.webp" }
        ]
    })
}

async fn mount_json(server: &MockServer, route: &str, body: &serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn load(server: &MockServer) -> ProductStore {
    let sources = default_sources(&server.uri()).expect("valid base");
    ProductStore::load(&test_client(), &sources, &BrandTable::builtin()).await
}

#[tokio::test]
async fn load_concatenates_all_sources_in_order() {
    let server = MockServer::start().await;
    mount_json(&server, "/man/products.json", &men_json()).await;
    mount_json(
        &server,
        "/women/products.json",
        &json!([{
            "name": "Adidas Samba OG",
            "brand": "adidas",
            "price": 1999,
            "category": "women",
            "image": "images/samba.webp"
        }]),
    )
    .await;
    mount_json(&server, "/unisex/products.json", &unisex_json()).await;

    let store = load(&server).await;

    let names: Vec<&str> = store.products().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Nike Dunk Low Panda",
            "New Balance 550",
            "Adidas Samba OG",
            "Air Jordan 1 Chicago"
        ]
    );
    assert_eq!(store.products()[1].brand, "newbalance");
    assert_eq!(store.products()[1].price, 3199);
    assert_eq!(store.products()[3].brand, "jordan");
    assert_eq!(store.products()[3].category, Category::Unisex);
}

#[tokio::test]
async fn load_tolerates_one_failing_source() {
    let server = MockServer::start().await;
    mount_json(&server, "/man/products.json", &men_json()).await;
    Mock::given(method("GET"))
        .and(path("/women/products.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_json(&server, "/unisex/products.json", &unisex_json()).await;

    let store = load(&server).await;

    assert_eq!(store.len(), 3, "men (2) + unisex (1 valid) expected");
}

#[tokio::test]
async fn load_tolerates_malformed_document() {
    let server = MockServer::start().await;
    mount_json(&server, "/man/products.json", &men_json()).await;
    Mock::given(method("GET"))
        .and(path("/women/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    // unisex is not mounted at all: wiremock answers 404.

    let store = load(&server).await;

    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn load_with_every_source_failing_yields_empty_catalog() {
    let server = MockServer::start().await;

    let store = load(&server).await;

    assert!(store.is_empty());
    assert!(store.price_bounds().is_none());
}

#[tokio::test]
async fn fetch_document_maps_404_to_not_found() {
    let server = MockServer::start().await;
    let sources = default_sources(&server.uri()).unwrap();

    let err = test_client().fetch_document(&sources[0]).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn fetch_document_maps_429_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/man/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&server)
        .await;
    let sources = default_sources(&server.uri()).unwrap();

    let err = test_client().fetch_document(&sources[0]).await.unwrap_err();

    assert!(
        matches!(err, CatalogError::RateLimited { retry_after_secs: 12, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_document_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/man/products.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(&server, "/man/products.json", &men_json()).await;
    let sources = default_sources(&server.uri()).unwrap();
    let client = CatalogClient::new(5, "arise-test/0.1", 2, 0).unwrap();

    let records = client.fetch_document(&sources[0]).await.unwrap();

    assert_eq!(records.len(), 2);
}
