//! Product domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use corduroy_core::{Age, Color, ProductId, Season, Sex, Size};

/// A catalog item.
///
/// Name, brand, country, and type are stored lower-cased; the applicability
/// tags (season/sex/age) and the available-* lists are Postgres enum arrays.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub country: String,
    /// Materials, e.g. "cotton", "wool".
    pub material: Vec<String>,
    pub size: Option<Size>,
    pub available_sizes: Vec<Size>,
    pub height: Option<Decimal>,
    pub width: Option<Decimal>,
    pub depth: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub color: Option<Color>,
    pub available_colors: Vec<Color>,
    pub season: Vec<Season>,
    pub sex: Vec<Sex>,
    pub age: Vec<Age>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: Decimal,
    pub available_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let product = Product {
            id: ProductId::generate(),
            name: "shirt".to_string(),
            brand: "acme".to_string(),
            country: "italy".to_string(),
            material: vec!["cotton".to_string()],
            size: Some(Size::M),
            available_sizes: vec![Size::S, Size::M],
            height: None,
            width: None,
            depth: None,
            weight: None,
            color: Some(Color::Blue),
            available_colors: vec![Color::Blue, Color::Black],
            season: vec![Season::Summer],
            sex: vec![Sex::Unisex],
            age: vec![Age::Adult],
            description: None,
            product_type: "shirt".to_string(),
            price: Decimal::new(3000, 2),
            available_quantity: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(product).unwrap();
        // "type" on the wire, not "productType"
        assert_eq!(json.get("type").unwrap(), "shirt");
        assert!(json.get("productType").is_none());
        assert_eq!(json.get("availableSizes").unwrap()[0], "S");
        assert_eq!(json.get("season").unwrap()[0], "SUMMER");
    }
}
