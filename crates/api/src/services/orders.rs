//! Order lifecycle service.
//!
//! Orders move product ids between the owner's cart and the order itself:
//! creation and add-products pull ids out of the cart, remove-products and
//! reset push them back. Every compound mutation runs in one transaction
//! with the affected rows locked, so cart and order can never be observed
//! half-reconciled.

use rust_decimal::Decimal;
use sqlx::PgPool;

use corduroy_core::{OrderId, OrderStatus, PaymentStatus, ProductId, UserId};

use crate::db::users::UserRepository;
use crate::db::{carts, orders};
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::cart::remove_first_each;
use crate::models::{Cart, OrderSummary};

/// Parameters for creating an order from the caller's cart.
pub struct CreateOrderParams {
    pub delivery_address: String,
    pub deposited_amount: Decimal,
    pub delivery_cost: Decimal,
    pub total_cost: Decimal,
    pub products_cost: Decimal,
    pub products: Vec<ProductId>,
}

/// Order lifecycle service.
pub struct OrderService<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from the caller's cart contents.
    ///
    /// The new order starts in the `CART` state with pending payment and
    /// delivery, payment method defaulted to debit card, and the caller's
    /// full name as recipient. The ordered ids leave the cart with
    /// first-match-per-id semantics. Responds with the updated cart.
    ///
    /// # Errors
    ///
    /// - `BadRequest` for an empty product list, a cost mismatch, or a
    ///   missing customer/cart record
    /// - `Internal` if any product id does not resolve
    pub async fn create(&self, customer_id: UserId, params: CreateOrderParams) -> Result<Cart> {
        if params.products.is_empty() {
            return Err(AppError::BadRequest(
                "there are no products in the order".to_string(),
            ));
        }

        let mut unique = params.products.clone();
        unique.sort_unstable_by_key(ProductId::as_uuid);
        unique.dedup();
        let existing = ProductRepository::new(self.pool)
            .count_existing(&unique)
            .await?;
        if existing != i64::try_from(unique.len()).unwrap_or(i64::MAX) {
            return Err(AppError::Internal(
                "some products do not exist".to_string(),
            ));
        }

        if params.products_cost + params.delivery_cost != params.total_cost {
            return Err(AppError::BadRequest(
                "total cost must be equal to the sum of delivery and products costs".to_string(),
            ));
        }

        let customer = UserRepository::new(self.pool)
            .get_by_id(customer_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("the customer {customer_id} was not found"))
            })?;

        let mut tx = self.pool.begin().await?;

        let cart = carts::get_by_user_locked(&mut tx, customer_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("the cart does not exist".to_string()))?;

        let order = orders::insert(
            &mut tx,
            orders::CreateOrder {
                customer_id,
                recipient: customer.full_name(),
                delivery_address: params.delivery_address,
                deposited_amount: params.deposited_amount,
                delivery_cost: params.delivery_cost,
                total_cost: params.total_cost,
                products_cost: params.products_cost,
                products: params.products,
            },
        )
        .await?;

        let mut remaining = cart.products.clone();
        remove_first_each(&mut remaining, &order.products);
        let updated_cart = carts::set_products(&mut tx, cart.id, &remaining).await?;

        tx.commit().await?;

        Ok(updated_cart)
    }

    /// List all orders owned by the caller, projected to public fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list(&self, customer_id: UserId) -> Result<Vec<OrderSummary>> {
        let orders = orders::list_by_customer(self.pool, customer_id).await?;
        Ok(orders.into_iter().map(OrderSummary::from).collect())
    }

    /// Get a single order, scoped to its owner in the lookup itself.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if no such order belongs to the caller.
    pub async fn get(&self, customer_id: UserId, order_id: OrderId) -> Result<OrderSummary> {
        let order = orders::get_by_id_for_customer(self.pool, order_id, customer_id)
            .await?
            .ok_or_else(|| order_missing(order_id))?;

        Ok(order.into())
    }

    /// Merge the given shipping/payment fields into an order.
    ///
    /// Cost fields are not editable and are not re-validated here.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the order does not exist.
    pub async fn edit(&self, order_id: OrderId, details: orders::OrderDetails) -> Result<OrderSummary> {
        let order = orders::update_details(self.pool, order_id, details)
            .await?
            .ok_or_else(|| order_missing(order_id))?;

        Ok(order.into())
    }

    /// Move the given product ids from the caller's cart into an order.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the order does not exist and `BadRequest` if
    /// the caller has no cart.
    pub async fn add_products(
        &self,
        customer_id: UserId,
        order_id: OrderId,
        product_ids: Vec<ProductId>,
    ) -> Result<OrderSummary> {
        let mut tx = self.pool.begin().await?;

        let order = orders::get_by_id_locked(&mut tx, order_id)
            .await?
            .ok_or_else(|| order_missing(order_id))?;
        let cart = carts::get_by_user_locked(&mut tx, customer_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("the cart does not exist".to_string()))?;

        let mut cart_products = cart.products.clone();
        remove_first_each(&mut cart_products, &product_ids);
        carts::set_products(&mut tx, cart.id, &cart_products).await?;

        let mut order_products = order.products.clone();
        order_products.extend(product_ids);
        let updated = orders::set_products(&mut tx, order.id, &order_products).await?;

        tx.commit().await?;

        Ok(updated.into())
    }

    /// Move the given product ids from an order back to the caller's cart.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the order does not exist and `BadRequest` if
    /// the caller has no cart.
    pub async fn remove_products(
        &self,
        customer_id: UserId,
        order_id: OrderId,
        product_ids: Vec<ProductId>,
    ) -> Result<OrderSummary> {
        let mut tx = self.pool.begin().await?;

        let order = orders::get_by_id_locked(&mut tx, order_id)
            .await?
            .ok_or_else(|| order_missing(order_id))?;
        let cart = carts::get_by_user_locked(&mut tx, customer_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("the cart does not exist".to_string()))?;

        let mut order_products = order.products.clone();
        remove_first_each(&mut order_products, &product_ids);
        let updated = orders::set_products(&mut tx, order.id, &order_products).await?;

        let mut cart_products = cart.products.clone();
        cart_products.extend(product_ids);
        carts::set_products(&mut tx, cart.id, &cart_products).await?;

        tx.commit().await?;

        Ok(updated.into())
    }

    /// Confirm an order, optionally updating its payment status.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the order does not exist.
    pub async fn confirm(
        &self,
        order_id: OrderId,
        payment_status: Option<PaymentStatus>,
    ) -> Result<OrderSummary> {
        let order = orders::set_status(self.pool, order_id, OrderStatus::Created, payment_status)
            .await?
            .ok_or_else(|| order_missing(order_id))?;

        Ok(order.into())
    }

    /// Cancel an order. Terminal; the products stay on the order.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the order does not exist.
    pub async fn cancel(&self, order_id: OrderId) -> Result<OrderSummary> {
        let order = orders::set_status(self.pool, order_id, OrderStatus::Canceled, None)
            .await?
            .ok_or_else(|| order_missing(order_id))?;

        Ok(order.into())
    }

    /// Return an order's products to the caller's cart and delete the order.
    ///
    /// The inverse of [`Self::create`]: every id on the order is appended
    /// back to the cart (no dedup) and the order row is removed, in one
    /// transaction. Responds with the updated cart.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the order does not exist and `BadRequest` if
    /// the caller has no cart.
    pub async fn reset(&self, customer_id: UserId, order_id: OrderId) -> Result<Cart> {
        let mut tx = self.pool.begin().await?;

        let order = orders::get_by_id_locked(&mut tx, order_id)
            .await?
            .ok_or_else(|| order_missing(order_id))?;
        let cart = carts::get_by_user_locked(&mut tx, customer_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("the cart does not exist".to_string()))?;

        let mut cart_products = cart.products.clone();
        cart_products.extend(order.products.iter().copied());
        let updated_cart = carts::set_products(&mut tx, cart.id, &cart_products).await?;

        orders::delete(&mut tx, order.id).await?;

        tx.commit().await?;

        Ok(updated_cart)
    }
}

fn order_missing(order_id: OrderId) -> AppError {
    AppError::Internal(format!("the order with id {order_id} does not exist"))
}
