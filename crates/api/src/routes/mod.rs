//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (verifies database)
//!
//! # Users
//! POST /api/user/signup         - Register, returns a token
//! POST /api/user/signin         - Verify credentials, returns a token
//! POST /api/user/auth           - Introspect the presented token
//!
//! # Products
//! POST   /api/product           - Create a catalog item (auth)
//! GET    /api/product           - Filterable search
//! GET    /api/product/{id}      - Single product
//! PUT    /api/product/{id}      - Partial update (auth)
//! DELETE /api/product/{id}      - Delete (auth)
//!
//! # Cart (all auth)
//! GET /api/cart                       - The caller's cart
//! PUT /api/cart/add-product/{id}      - Append a product id
//! PUT /api/cart/remove-product/{id}   - Remove the first occurrence
//! PUT /api/cart/clear-cart            - Empty the cart
//!
//! # Orders (all auth)
//! GET    /api/order                       - The caller's orders
//! GET    /api/order/{id}                  - Single order, ownership-scoped
//! POST   /api/order/create                - Create from cart, returns the cart
//! DELETE /api/order/reset/{id}            - Products back to cart, order deleted
//! PUT    /api/order/edit/{id}             - Merge shipping/payment fields
//! PUT    /api/order/add-products/{id}     - Cart -> order
//! PUT    /api/order/remove-products/{id}  - Order -> cart
//! PUT    /api/order/confirmation/{id}     - Status CREATED
//! PUT    /api/order/cancel/{id}           - Status CANCELED
//! ```

pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(users::signup))
        .route("/signin", post(users::signin))
        .route("/auth", post(users::auth))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create).get(products::search))
        .route(
            "/{id}",
            get(products::get_one)
                .put(products::update)
                .delete(products::remove),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add-product/{id}", put(cart::add_product))
        .route("/remove-product/{id}", put(cart::remove_product))
        .route("/clear-cart", put(cart::clear))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list))
        .route("/create", post(orders::create))
        .route("/reset/{id}", delete(orders::reset))
        .route("/edit/{id}", put(orders::edit))
        .route("/add-products/{id}", put(orders::add_products))
        .route("/remove-products/{id}", put(orders::remove_products))
        .route("/confirmation/{id}", put(orders::confirm))
        .route("/cancel/{id}", put(orders::cancel))
        .route("/{id}", get(orders::get_one))
}

/// Create all routes for the API, nested under `/api`.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .nest("/user", user_routes())
        .nest("/product", product_routes())
        .nest("/cart", cart_routes())
        .nest("/order", order_routes());

    Router::new().nest("/api", api)
}
