//! Domain types.
//!
//! These types represent validated domain objects. They derive `FromRow`
//! for the runtime sqlx query API and `Serialize` for JSON responses;
//! anything that must never leave the server (password hashes) is not a
//! field on them.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::Cart;
pub use order::{Order, OrderSummary};
pub use product::Product;
pub use user::User;
