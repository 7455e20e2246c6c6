//! Catalog and order enums.
//!
//! JSON representations use SCREAMING_SNAKE_CASE to match the wire format
//! the API has always spoken; the same labels are used for the Postgres
//! enum types (with the `postgres` feature).

use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "role", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
    Admin,
}

/// Sex, both as a user profile attribute and a product applicability tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "sex", rename_all = "SCREAMING_SNAKE_CASE", no_pg_array)
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Male,
    Female,
    Unisex,
    #[default]
    Unknown,
}

/// Age bracket a product is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "age", rename_all = "SCREAMING_SNAKE_CASE", no_pg_array)
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Age {
    Baby,
    Child,
    Teen,
    Adult,
}

/// Garment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "size", rename_all = "SCREAMING_SNAKE_CASE", no_pg_array)
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

/// Garment color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "color", rename_all = "SCREAMING_SNAKE_CASE", no_pg_array)
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Black,
    White,
    Grey,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Pink,
    Brown,
    Beige,
}

/// Season a product is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "season", rename_all = "SCREAMING_SNAKE_CASE", no_pg_array)
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

/// Order lifecycle state: `CART` (pending checkout) -> `CREATED` (confirmed)
/// -> `CANCELED` (terminal). Reset deletes the order instead of transitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Cart,
    Created,
    Canceled,
}

/// How the order will be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    DebitCard,
    CreditCard,
    Cash,
    Paypal,
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// Delivery state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "delivery_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

// Postgres array support for the enums stored in array columns.
#[cfg(feature = "postgres")]
mod pg_arrays {
    use sqlx::postgres::{PgHasArrayType, PgTypeInfo};

    use super::{Age, Color, Season, Sex, Size};

    impl PgHasArrayType for Size {
        fn array_type_info() -> PgTypeInfo {
            PgTypeInfo::with_name("_size")
        }
    }

    impl PgHasArrayType for Color {
        fn array_type_info() -> PgTypeInfo {
            PgTypeInfo::with_name("_color")
        }
    }

    impl PgHasArrayType for Season {
        fn array_type_info() -> PgTypeInfo {
            PgTypeInfo::with_name("_season")
        }
    }

    impl PgHasArrayType for Sex {
        fn array_type_info() -> PgTypeInfo {
            PgTypeInfo::with_name("_sex")
        }
    }

    impl PgHasArrayType for Age {
        fn array_type_info() -> PgTypeInfo {
            PgTypeInfo::with_name("_age")
        }
    }
}
