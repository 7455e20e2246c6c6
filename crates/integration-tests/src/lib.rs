//! Integration tests for Corduroy.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! sqlx migrate run --source crates/api/migrations
//!
//! # Start the API
//! cargo run -p corduroy-api
//!
//! # Run the (ignored-by-default) HTTP tests
//! cargo test -p corduroy-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a live server over HTTP; each test registers its own
//! throwaway account so runs don't interfere with each other.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Client;
use serde_json::Value;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CORDUROY_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Plain HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique throwaway email for one test run.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@test.example", uuid::Uuid::new_v4())
}

/// Register a fresh account and return its bearer token.
///
/// # Panics
///
/// Panics if signup does not answer with a token.
pub async fn signup(client: &Client, email: &str) -> String {
    let resp = client
        .post(format!("{}/api/user/signup", base_url()))
        .json(&serde_json::json!({
            "firstName": "Test",
            "lastName": "Shopper",
            "phone": "5550100",
            "email": email,
            "password": "correct-horse-battery",
        }))
        .send()
        .await
        .expect("signup request failed");

    assert!(resp.status().is_success(), "signup failed: {}", resp.status());

    let body: Value = resp.json().await.expect("signup response was not JSON");
    body["token"]
        .as_str()
        .expect("signup response had no token")
        .to_string()
}

/// Decode a JWT's payload segment without verifying it.
///
/// Verification is the server's job; tests only peek at the claims.
///
/// # Panics
///
/// Panics if the token is not a three-segment JWT with a JSON payload.
#[must_use]
pub fn token_payload(token: &str) -> Value {
    let payload = token
        .split('.')
        .nth(1)
        .expect("token is not a three-segment JWT");
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .expect("token payload is not base64url");
    serde_json::from_slice(&bytes).expect("token payload is not JSON")
}

/// Create a minimal product and return its id.
///
/// # Panics
///
/// Panics if creation fails.
pub async fn create_product(client: &Client, token: &str, name: &str, price: &str) -> String {
    let resp = client
        .post(format!("{}/api/product", base_url()))
        .bearer_auth(token)
        .json(&serde_json::json!({
            "name": name,
            "brand": "Acme",
            "country": "Italy",
            "type": "shirt",
            "price": price,
            "availableQuantity": 10,
        }))
        .send()
        .await
        .expect("create product request failed");

    assert!(
        resp.status().is_success(),
        "create product failed: {}",
        resp.status()
    );

    let body: Value = resp.json().await.expect("product response was not JSON");
    body["id"]
        .as_str()
        .expect("product response had no id")
        .to_string()
}
