//! Database operations for carts.
//!
//! Simple lookups take the pool; the `*_locked` variants take a transaction
//! connection and lock the cart row, for callers that reconcile cart and
//! order contents atomically.

use sqlx::{PgConnection, PgPool};

use corduroy_core::{CartId, ProductId, UserId};

use super::RepositoryError;
use crate::models::Cart;
use crate::models::cart::remove_first;

const CART_COLUMNS: &str = "id, user_id, products, created_at, updated_at";

/// Get a user's cart.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_user(pool: &PgPool, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
    let cart = sqlx::query_as::<_, Cart>(&format!(
        "SELECT {CART_COLUMNS} FROM carts WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(cart)
}

/// Get a user's cart inside a transaction, locking the row until commit.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_user_locked(
    conn: &mut PgConnection,
    user_id: UserId,
) -> Result<Option<Cart>, RepositoryError> {
    let cart = sqlx::query_as::<_, Cart>(&format!(
        "SELECT {CART_COLUMNS} FROM carts WHERE user_id = $1 FOR UPDATE"
    ))
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(cart)
}

/// Replace a cart's product list.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the cart doesn't exist.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn set_products(
    conn: &mut PgConnection,
    cart_id: CartId,
    products: &[ProductId],
) -> Result<Cart, RepositoryError> {
    let cart = sqlx::query_as::<_, Cart>(&format!(
        "UPDATE carts SET products = $2, updated_at = NOW()
         WHERE id = $1
         RETURNING {CART_COLUMNS}"
    ))
    .bind(cart_id)
    .bind(products)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(RepositoryError::NotFound)?;

    Ok(cart)
}

/// Append a product id to a user's cart (duplicates allowed).
///
/// Returns `None` if the user has no cart. Single-statement append, so
/// concurrent adds cannot lose each other.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn append_product(
    pool: &PgPool,
    user_id: UserId,
    product_id: ProductId,
) -> Result<Option<Cart>, RepositoryError> {
    let cart = sqlx::query_as::<_, Cart>(&format!(
        "UPDATE carts SET products = array_append(products, $2), updated_at = NOW()
         WHERE user_id = $1
         RETURNING {CART_COLUMNS}"
    ))
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    Ok(cart)
}

/// Remove the first occurrence of a product id from a user's cart.
///
/// Read-modify-write under a row lock so a concurrent removal cannot drop
/// a second occurrence. Returns `None` if the user has no cart; an absent
/// product id leaves the cart unchanged.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the transaction fails.
pub async fn remove_product_first(
    pool: &PgPool,
    user_id: UserId,
    product_id: ProductId,
) -> Result<Option<Cart>, RepositoryError> {
    let mut tx = pool.begin().await?;

    let Some(cart) = get_by_user_locked(&mut tx, user_id).await? else {
        return Ok(None);
    };

    let mut products = cart.products.clone();
    if !remove_first(&mut products, product_id) {
        tx.commit().await?;
        return Ok(Some(cart));
    }

    let updated = set_products(&mut tx, cart.id, &products).await?;
    tx.commit().await?;

    Ok(Some(updated))
}

/// Remove every product id from a user's cart.
///
/// Returns `None` if the user has no cart.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn clear(pool: &PgPool, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
    let cart = sqlx::query_as::<_, Cart>(&format!(
        "UPDATE carts SET products = '{{}}', updated_at = NOW()
         WHERE user_id = $1
         RETURNING {CART_COLUMNS}"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(cart)
}
