//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use corduroy_core::{
    DeliveryStatus, OrderId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, UserId,
};

/// A checkout snapshot derived from a cart.
///
/// Cost invariant: `products_cost + delivery_cost == total_cost`, enforced
/// at creation time.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning user.
    pub customer_id: UserId,
    pub delivery_address: String,
    pub recipient: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub products_cost: Decimal,
    pub delivery_cost: Decimal,
    pub total_cost: Decimal,
    pub deposited_amount: Decimal,
    /// Ordered product id list, duplicates permitted.
    pub products: Vec<ProductId>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The public projection of an order returned by the API.
///
/// The customer id and row timestamps are internal bookkeeping and never
/// leave the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub delivery_address: String,
    pub deposited_amount: Decimal,
    pub delivery_cost: Decimal,
    pub delivery_status: DeliveryStatus,
    pub total_cost: Decimal,
    pub recipient: String,
    pub payment_status: PaymentStatus,
    pub products_cost: Decimal,
    pub payment_method: PaymentMethod,
    pub products: Vec<ProductId>,
    pub status: OrderStatus,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            delivery_address: order.delivery_address,
            deposited_amount: order.deposited_amount,
            delivery_cost: order.delivery_cost,
            delivery_status: order.delivery_status,
            total_cost: order.total_cost,
            recipient: order.recipient,
            payment_status: order.payment_status,
            products_cost: order.products_cost,
            payment_method: order.payment_method,
            products: order.products,
            status: order.status,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_hides_internal_fields() {
        let order = Order {
            id: OrderId::generate(),
            customer_id: UserId::generate(),
            delivery_address: "1 Main St".to_string(),
            recipient: "Ada Lovelace".to_string(),
            payment_method: PaymentMethod::DebitCard,
            payment_status: PaymentStatus::Pending,
            delivery_status: DeliveryStatus::Pending,
            products_cost: Decimal::new(3000, 2),
            delivery_cost: Decimal::new(500, 2),
            total_cost: Decimal::new(3500, 2),
            deposited_amount: Decimal::ZERO,
            products: vec![ProductId::generate()],
            status: OrderStatus::Cart,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(OrderSummary::from(order)).unwrap();
        assert!(json.get("customerId").is_none());
        assert!(json.get("createdAt").is_none());
        assert_eq!(json.get("status").unwrap(), "CART");
        assert_eq!(json.get("paymentMethod").unwrap(), "DEBIT_CARD");
    }
}
