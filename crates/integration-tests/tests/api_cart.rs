//! Integration tests for cart operations.
//!
//! Run with: cargo test -p corduroy-integration-tests -- --ignored

use corduroy_integration_tests::{base_url, client, create_product, signup, unique_email};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn cart_products(client: &Client, token: &str) -> Vec<String> {
    let cart: Value = client
        .get(format!("{}/api/cart", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("cart request failed")
        .json()
        .await
        .expect("cart was not JSON");

    cart["products"]
        .as_array()
        .expect("cart.products was not an array")
        .iter()
        .map(|v| v.as_str().expect("product id was not a string").to_string())
        .collect()
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_add_then_remove_restores_cart() {
    let client = client();
    let token = signup(&client, &unique_email("cart-roundtrip")).await;
    let product_id = create_product(&client, &token, "cart-roundtrip-probe", "12").await;

    let resp = client
        .put(format!("{}/api/cart/add-product/{product_id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("add request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(cart_products(&client, &token).await, vec![product_id.clone()]);

    let resp = client
        .put(format!(
            "{}/api/cart/remove-product/{product_id}",
            base_url()
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("remove request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(cart_products(&client, &token).await.is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_duplicates_allowed_and_removed_one_at_a_time() {
    let client = client();
    let token = signup(&client, &unique_email("cart-duplicates")).await;
    let product_id = create_product(&client, &token, "cart-duplicates-probe", "12").await;

    for _ in 0..2 {
        client
            .put(format!("{}/api/cart/add-product/{product_id}", base_url()))
            .bearer_auth(&token)
            .send()
            .await
            .expect("add request failed");
    }
    assert_eq!(cart_products(&client, &token).await.len(), 2);

    let cart: Value = client
        .put(format!(
            "{}/api/cart/remove-product/{product_id}",
            base_url()
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("remove request failed")
        .json()
        .await
        .expect("cart was not JSON");

    // First occurrence only
    assert_eq!(cart["products"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_remove_from_empty_cart_fails() {
    let client = client();
    let token = signup(&client, &unique_email("cart-empty-remove")).await;
    let product_id = create_product(&client, &token, "cart-empty-probe", "12").await;

    let resp = client
        .put(format!(
            "{}/api/cart/remove-product/{product_id}",
            base_url()
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("remove request failed");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_add_unknown_product_fails() {
    let client = client();
    let token = signup(&client, &unique_email("cart-unknown-product")).await;

    let resp = client
        .put(format!(
            "{}/api/cart/add-product/00000000-0000-4000-8000-00000000dead",
            base_url()
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("add request failed");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_clear_cart_empties_product_list() {
    let client = client();
    let token = signup(&client, &unique_email("cart-clear")).await;
    let product_id = create_product(&client, &token, "cart-clear-probe", "12").await;

    for _ in 0..3 {
        client
            .put(format!("{}/api/cart/add-product/{product_id}", base_url()))
            .bearer_auth(&token)
            .send()
            .await
            .expect("add request failed");
    }

    let cart: Value = client
        .put(format!("{}/api/cart/clear-cart", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("clear request failed")
        .json()
        .await
        .expect("cart was not JSON");

    assert_eq!(cart["products"], json!([]));
    assert!(cart_products(&client, &token).await.is_empty());
}
