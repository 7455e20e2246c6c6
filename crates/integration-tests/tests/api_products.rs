//! Integration tests for the product catalog.
//!
//! Run with: cargo test -p corduroy-integration-tests -- --ignored

use corduroy_integration_tests::{base_url, client, create_product, signup, unique_email};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_create_normalizes_and_returns_product() {
    let client = client();
    let token = signup(&client, &unique_email("product-create")).await;

    let resp = client
        .post(format!("{}/api/product", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Linen Shirt",
            "brand": "ACME",
            "country": "Italy",
            "type": "Shirt",
            "material": ["linen"],
            "season": ["SUMMER"],
            "color": "BLUE",
            "availableColors": ["BLUE", "WHITE"],
            "price": 30,
            "availableQuantity": 5,
        }))
        .send()
        .await
        .expect("create request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.expect("product was not JSON");

    // Lower-cased on create
    assert_eq!(product["name"], "linen shirt");
    assert_eq!(product["brand"], "acme");
    assert_eq!(product["type"], "shirt");
    assert_eq!(product["season"], json!(["SUMMER"]));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_price_range_search_is_inclusive() {
    let client = client();
    let token = signup(&client, &unique_email("price-search")).await;

    let name = format!("price-probe-{}", uuid::Uuid::new_v4());
    create_product(&client, &token, &name, "30").await;

    let in_range: Vec<Value> = client
        .get(format!(
            "{}/api/product?name={name}&minPrice=20&maxPrice=40",
            base_url()
        ))
        .send()
        .await
        .expect("search failed")
        .json()
        .await
        .expect("search result was not JSON");
    assert_eq!(in_range.len(), 1, "price 30 must match [20, 40]");

    let out_of_range: Vec<Value> = client
        .get(format!(
            "{}/api/product?name={name}&minPrice=40&maxPrice=50",
            base_url()
        ))
        .send()
        .await
        .expect("search failed")
        .json()
        .await
        .expect("search result was not JSON");
    assert!(out_of_range.is_empty(), "price 30 must not match [40, 50]");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_season_filter_requires_all_values() {
    let client = client();
    let token = signup(&client, &unique_email("season-search")).await;

    let name = format!("season-probe-{}", uuid::Uuid::new_v4());
    let resp = client
        .post(format!("{}/api/product", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "name": name,
            "brand": "Acme",
            "country": "Italy",
            "type": "jacket",
            "season": ["SUMMER"],
            "price": 80,
            "availableQuantity": 3,
        }))
        .send()
        .await
        .expect("create request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // AND semantics: a SUMMER-only product must not match SUMMER+WINTER
    let both: Vec<Value> = client
        .get(format!(
            "{}/api/product?name={name}&season=SUMMER&season=WINTER",
            base_url()
        ))
        .send()
        .await
        .expect("search failed")
        .json()
        .await
        .expect("search result was not JSON");
    assert!(both.is_empty());

    let summer_only: Vec<Value> = client
        .get(format!("{}/api/product?name={name}&season=SUMMER", base_url()))
        .send()
        .await
        .expect("search failed")
        .json()
        .await
        .expect("search result was not JSON");
    assert_eq!(summer_only.len(), 1);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_get_unknown_product_is_bad_request() {
    let client = client();

    let resp = client
        .get(format!(
            "{}/api/product/00000000-0000-4000-8000-00000000dead",
            base_url()
        ))
        .send()
        .await
        .expect("get request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_update_merges_only_given_fields() {
    let client = client();
    let token = signup(&client, &unique_email("product-update")).await;
    let id = create_product(&client, &token, "update-probe", "30").await;

    let resp = client
        .put(format!("{}/api/product/{id}", base_url()))
        .bearer_auth(&token)
        .json(&json!({"price": 45}))
        .send()
        .await
        .expect("update request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.expect("product was not JSON");
    // NUMERIC(10,2) comes back with two decimal places
    assert_eq!(product["price"], "45.00");
    // Untouched fields survive the merge
    assert_eq!(product["brand"], "acme");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_delete_then_fetch_is_bad_request() {
    let client = client();
    let token = signup(&client, &unique_email("product-delete")).await;
    let id = create_product(&client, &token, "delete-probe", "10").await;

    let resp = client
        .delete(format!("{}/api/product/{id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("delete request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/api/product/{id}", base_url()))
        .send()
        .await
        .expect("get request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Deleting again fails the existence check
    let resp = client
        .delete(format!("{}/api/product/{id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("delete request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
