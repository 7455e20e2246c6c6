//! Cart route handlers.
//!
//! The caller's cart is resolved from the bearer token; there is no cart id
//! in any route.

use axum::{
    Json,
    extract::{Path, State},
};

use corduroy_core::ProductId;

use crate::db::carts;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::Cart;
use crate::state::AppState;

fn cart_missing() -> AppError {
    AppError::Internal("the cart with this id does not exist".to_string())
}

fn product_missing() -> AppError {
    AppError::Internal("the product with this id does not exist".to_string())
}

/// Get the caller's cart.
///
/// GET /api/cart
///
/// # Errors
///
/// Returns `AppError::Internal` if the caller has no cart.
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Cart>> {
    let cart = carts::get_by_user(state.pool(), claims.sub)
        .await?
        .ok_or_else(cart_missing)?;

    Ok(Json(cart))
}

/// Append a product to the caller's cart (duplicates allowed).
///
/// PUT /api/cart/add-product/:id
///
/// # Errors
///
/// Returns `AppError::Internal` if the cart or the product does not exist.
pub async fn add_product(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Cart>> {
    carts::get_by_user(state.pool(), claims.sub)
        .await?
        .ok_or_else(cart_missing)?;

    ProductRepository::new(state.pool())
        .get_by_id(product_id)
        .await?
        .ok_or_else(product_missing)?;

    let cart = carts::append_product(state.pool(), claims.sub, product_id)
        .await?
        .ok_or_else(cart_missing)?;

    Ok(Json(cart))
}

/// Remove the first occurrence of a product from the caller's cart.
///
/// PUT /api/cart/remove-product/:id
///
/// # Errors
///
/// Returns `AppError::Internal` if the cart is missing or empty, or the
/// product does not exist.
pub async fn remove_product(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Cart>> {
    let cart = carts::get_by_user(state.pool(), claims.sub)
        .await?
        .ok_or_else(cart_missing)?;

    if cart.products.is_empty() {
        return Err(AppError::Internal(
            "there are no products in the cart".to_string(),
        ));
    }

    ProductRepository::new(state.pool())
        .get_by_id(product_id)
        .await?
        .ok_or_else(product_missing)?;

    let cart = carts::remove_product_first(state.pool(), claims.sub, product_id)
        .await?
        .ok_or_else(cart_missing)?;

    Ok(Json(cart))
}

/// Remove every product from the caller's cart.
///
/// PUT /api/cart/clear-cart
///
/// # Errors
///
/// Returns `AppError::Internal` if the caller has no cart.
pub async fn clear(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Cart>> {
    let cart = carts::clear(state.pool(), claims.sub)
        .await?
        .ok_or_else(cart_missing)?;

    Ok(Json(cart))
}
