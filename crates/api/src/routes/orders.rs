//! Order lifecycle route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use corduroy_core::{OrderId, PaymentMethod, PaymentStatus, ProductId};

use crate::db::orders::OrderDetails;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::{Cart, OrderSummary};
use crate::services::OrderService;
use crate::services::orders::CreateOrderParams;
use crate::state::AppState;

/// Create-order request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub delivery_address: String,
    #[serde(default)]
    pub deposited_amount: Decimal,
    pub delivery_cost: Decimal,
    pub total_cost: Decimal,
    pub products_cost: Decimal,
    #[serde(default)]
    pub products: Vec<ProductId>,
}

/// Edit-order request body; omitted fields are left untouched.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EditOrderRequest {
    pub delivery_address: Option<String>,
    pub recipient: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

/// Body for moving products between an order and the caller's cart.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct OrderProductsRequest {
    pub products: Vec<ProductId>,
}

/// Confirmation request body.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfirmOrderRequest {
    pub payment_status: Option<PaymentStatus>,
}

/// List the caller's orders.
///
/// GET /api/order
///
/// # Errors
///
/// Returns `AppError` if the query fails.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<OrderSummary>>> {
    let orders = OrderService::new(state.pool()).list(claims.sub).await?;
    Ok(Json(orders))
}

/// Get one of the caller's orders.
///
/// GET /api/order/:id
///
/// # Errors
///
/// Returns `AppError` if no such order belongs to the caller.
pub async fn get_one(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(order_id): Path<OrderId>,
) -> Result<Json<OrderSummary>> {
    let order = OrderService::new(state.pool())
        .get(claims.sub, order_id)
        .await?;

    Ok(Json(order))
}

/// Create an order from the caller's cart contents.
///
/// POST /api/order/create
///
/// Responds with the updated cart, not the order.
///
/// # Errors
///
/// Returns `AppError` for an empty product list, unknown products, a cost
/// mismatch, or a missing customer/cart.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Json(body): Json<CreateOrderRequest>,
) -> Result<Json<Cart>> {
    let cart = OrderService::new(state.pool())
        .create(
            claims.sub,
            CreateOrderParams {
                delivery_address: body.delivery_address,
                deposited_amount: body.deposited_amount,
                delivery_cost: body.delivery_cost,
                total_cost: body.total_cost,
                products_cost: body.products_cost,
                products: body.products,
            },
        )
        .await?;

    Ok(Json(cart))
}

/// Return an order's products to the cart and delete the order.
///
/// DELETE /api/order/reset/:id
///
/// Responds with the updated cart.
///
/// # Errors
///
/// Returns `AppError` if the order or the caller's cart does not exist.
pub async fn reset(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Cart>> {
    let cart = OrderService::new(state.pool())
        .reset(claims.sub, order_id)
        .await?;

    Ok(Json(cart))
}

/// Merge shipping/payment fields into an order.
///
/// PUT /api/order/edit/:id
///
/// # Errors
///
/// Returns `AppError` if the order does not exist.
pub async fn edit(
    State(state): State<AppState>,
    CurrentUser(_claims): CurrentUser,
    Path(order_id): Path<OrderId>,
    Json(body): Json<EditOrderRequest>,
) -> Result<Json<OrderSummary>> {
    let order = OrderService::new(state.pool())
        .edit(
            order_id,
            OrderDetails {
                delivery_address: body.delivery_address,
                recipient: body.recipient,
                payment_method: body.payment_method,
            },
        )
        .await?;

    Ok(Json(order))
}

/// Move products from the caller's cart into an order.
///
/// PUT /api/order/add-products/:id
///
/// # Errors
///
/// Returns `AppError` if the order or the caller's cart does not exist.
pub async fn add_products(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(order_id): Path<OrderId>,
    Json(body): Json<OrderProductsRequest>,
) -> Result<Json<OrderSummary>> {
    let order = OrderService::new(state.pool())
        .add_products(claims.sub, order_id, body.products)
        .await?;

    Ok(Json(order))
}

/// Move products from an order back to the caller's cart.
///
/// PUT /api/order/remove-products/:id
///
/// # Errors
///
/// Returns `AppError` if the order or the caller's cart does not exist.
pub async fn remove_products(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(order_id): Path<OrderId>,
    Json(body): Json<OrderProductsRequest>,
) -> Result<Json<OrderSummary>> {
    let order = OrderService::new(state.pool())
        .remove_products(claims.sub, order_id, body.products)
        .await?;

    Ok(Json(order))
}

/// Confirm an order, optionally updating its payment status.
///
/// PUT /api/order/confirmation/:id
///
/// # Errors
///
/// Returns `AppError` if the order does not exist.
pub async fn confirm(
    State(state): State<AppState>,
    CurrentUser(_claims): CurrentUser,
    Path(order_id): Path<OrderId>,
    body: Option<Json<ConfirmOrderRequest>>,
) -> Result<Json<OrderSummary>> {
    let payment_status = body.and_then(|Json(b)| b.payment_status);
    let order = OrderService::new(state.pool())
        .confirm(order_id, payment_status)
        .await?;

    Ok(Json(order))
}

/// Cancel an order.
///
/// PUT /api/order/cancel/:id
///
/// # Errors
///
/// Returns `AppError` if the order does not exist.
pub async fn cancel(
    State(state): State<AppState>,
    CurrentUser(_claims): CurrentUser,
    Path(order_id): Path<OrderId>,
) -> Result<Json<OrderSummary>> {
    let order = OrderService::new(state.pool()).cancel(order_id).await?;

    Ok(Json(order))
}
