//! Database operations for orders.
//!
//! Pool-taking functions serve plain lookups and single-row updates. The
//! connection-taking functions are composed by the order service into
//! transactions that keep order and cart product lists consistent.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use corduroy_core::{OrderId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::Order;

const ORDER_COLUMNS: &str = "id, customer_id, delivery_address, recipient, payment_method, \
     payment_status, delivery_status, products_cost, delivery_cost, total_cost, \
     deposited_amount, products, status, created_at, updated_at";

/// Parameters for creating an order.
///
/// Status, payment status, delivery status, and payment method take their
/// checkout defaults (`CART`, `PENDING`, `PENDING`, `DEBIT_CARD`).
pub struct CreateOrder {
    pub customer_id: UserId,
    pub recipient: String,
    pub delivery_address: String,
    pub deposited_amount: Decimal,
    pub delivery_cost: Decimal,
    pub total_cost: Decimal,
    pub products_cost: Decimal,
    pub products: Vec<ProductId>,
}

/// Optional fields merged by [`update_details`].
#[derive(Default)]
pub struct OrderDetails {
    pub delivery_address: Option<String>,
    pub recipient: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

/// List all orders owned by a customer.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_by_customer(
    pool: &PgPool,
    customer_id: UserId,
) -> Result<Vec<Order>, RepositoryError> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY created_at ASC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

/// Get an order by ID, scoped to its owner in the lookup itself.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_id_for_customer(
    pool: &PgPool,
    id: OrderId,
    customer_id: UserId,
) -> Result<Option<Order>, RepositoryError> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND customer_id = $2"
    ))
    .bind(id)
    .bind(customer_id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

/// Get an order by ID inside a transaction, locking the row until commit.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_id_locked(
    conn: &mut PgConnection,
    id: OrderId,
) -> Result<Option<Order>, RepositoryError> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(order)
}

/// Insert a new order in the `CART` state.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert(conn: &mut PgConnection, params: CreateOrder) -> Result<Order, RepositoryError> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders (
             customer_id, recipient, delivery_address, deposited_amount,
             delivery_cost, total_cost, products_cost, products
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(params.customer_id)
    .bind(&params.recipient)
    .bind(&params.delivery_address)
    .bind(params.deposited_amount)
    .bind(params.delivery_cost)
    .bind(params.total_cost)
    .bind(params.products_cost)
    .bind(&params.products)
    .fetch_one(&mut *conn)
    .await?;

    Ok(order)
}

/// Merge the given shipping/payment fields into an order.
///
/// Returns `None` if the order does not exist. Cost fields and status are
/// not editable here.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn update_details(
    pool: &PgPool,
    id: OrderId,
    details: OrderDetails,
) -> Result<Option<Order>, RepositoryError> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET
             delivery_address = COALESCE($2, delivery_address),
             recipient = COALESCE($3, recipient),
             payment_method = COALESCE($4, payment_method),
             updated_at = NOW()
         WHERE id = $1
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(id)
    .bind(details.delivery_address)
    .bind(details.recipient)
    .bind(details.payment_method)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

/// Set an order's lifecycle status, optionally updating the payment status.
///
/// Returns `None` if the order does not exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn set_status(
    pool: &PgPool,
    id: OrderId,
    status: OrderStatus,
    payment_status: Option<PaymentStatus>,
) -> Result<Option<Order>, RepositoryError> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET
             status = $2,
             payment_status = COALESCE($3, payment_status),
             updated_at = NOW()
         WHERE id = $1
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(id)
    .bind(status)
    .bind(payment_status)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

/// Replace an order's product list.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the order doesn't exist.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn set_products(
    conn: &mut PgConnection,
    id: OrderId,
    products: &[ProductId],
) -> Result<Order, RepositoryError> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET products = $2, updated_at = NOW()
         WHERE id = $1
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(id)
    .bind(products)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(RepositoryError::NotFound)?;

    Ok(order)
}

/// Delete an order.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the order doesn't exist.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn delete(conn: &mut PgConnection, id: OrderId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}
