//! Cart domain type and the product-list reconciliation helpers.
//!
//! A cart is a denormalized, ordered list of product ids. Duplicates are
//! permitted and stand in for quantity. The helpers here implement the
//! list-diff semantics shared by cart operations and the order lifecycle;
//! they are pure so the transactional repositories can apply them between
//! a locked read and a write.

use chrono::{DateTime, Utc};
use serde::Serialize;

use corduroy_core::{CartId, ProductId, UserId};

/// A user's pending, unordered collection of product ids awaiting checkout.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user; exactly one cart per user.
    pub user_id: UserId,
    /// Ordered product id list, duplicates permitted.
    pub products: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Remove the first occurrence of `id` from `products`.
///
/// Returns `true` if an occurrence was removed. Later duplicates are left
/// in place.
pub fn remove_first(products: &mut Vec<ProductId>, id: ProductId) -> bool {
    match products.iter().position(|p| *p == id) {
        Some(index) => {
            products.remove(index);
            true
        }
        None => false,
    }
}

/// Remove one occurrence per entry of `ids` from `products`.
///
/// First-match-per-id semantics: an id listed twice in `ids` removes up to
/// two occurrences; ids not present in `products` are ignored.
pub fn remove_first_each(products: &mut Vec<ProductId>, ids: &[ProductId]) {
    for id in ids {
        remove_first(products, *id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[u128]) -> Vec<ProductId> {
        values
            .iter()
            .map(|v| ProductId::new(uuid::Uuid::from_u128(*v)))
            .collect()
    }

    #[test]
    fn test_remove_first_removes_only_first_occurrence() {
        let mut products = ids(&[1, 2, 1, 3]);
        let removed = remove_first(&mut products, ProductId::new(uuid::Uuid::from_u128(1)));

        assert!(removed);
        assert_eq!(products, ids(&[2, 1, 3]));
    }

    #[test]
    fn test_remove_first_absent_id_is_noop() {
        let mut products = ids(&[1, 2]);
        let removed = remove_first(&mut products, ProductId::new(uuid::Uuid::from_u128(9)));

        assert!(!removed);
        assert_eq!(products, ids(&[1, 2]));
    }

    #[test]
    fn test_remove_first_from_empty_list() {
        let mut products = Vec::new();
        assert!(!remove_first(
            &mut products,
            ProductId::new(uuid::Uuid::from_u128(1))
        ));
        assert!(products.is_empty());
    }

    #[test]
    fn test_remove_first_each_takes_one_per_listed_id() {
        let mut products = ids(&[1, 1, 2, 3]);
        remove_first_each(&mut products, &ids(&[1, 3]));

        assert_eq!(products, ids(&[1, 2]));
    }

    #[test]
    fn test_remove_first_each_duplicate_in_ids_removes_twice() {
        let mut products = ids(&[1, 1, 2]);
        remove_first_each(&mut products, &ids(&[1, 1]));

        assert_eq!(products, ids(&[2]));
    }

    #[test]
    fn test_remove_first_each_ignores_missing_ids() {
        let mut products = ids(&[1, 2]);
        remove_first_each(&mut products, &ids(&[7, 8, 2]));

        assert_eq!(products, ids(&[1]));
    }

    #[test]
    fn test_add_then_remove_restores_prior_state() {
        // Cart add followed by remove of the same id is a no-op when the id
        // appeared exactly once afterwards.
        let mut products = ids(&[4, 5]);
        let id = ProductId::new(uuid::Uuid::from_u128(6));
        products.push(id);
        remove_first(&mut products, id);

        assert_eq!(products, ids(&[4, 5]));
    }
}
