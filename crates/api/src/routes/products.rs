//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use corduroy_core::{Age, Color, ProductId, Season, Sex, Size};

use crate::db::products::{CreateProduct, ProductFilters, ProductRepository, UpdateProduct};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::Product;
use crate::state::AppState;

/// Create-product request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub brand: String,
    pub country: String,
    #[serde(default)]
    pub material: Vec<String>,
    pub size: Option<Size>,
    #[serde(default)]
    pub available_sizes: Vec<Size>,
    pub height: Option<Decimal>,
    pub width: Option<Decimal>,
    pub depth: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub color: Option<Color>,
    #[serde(default)]
    pub available_colors: Vec<Color>,
    #[serde(default)]
    pub season: Vec<Season>,
    #[serde(default)]
    pub sex: Vec<Sex>,
    #[serde(default)]
    pub age: Vec<Age>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: Decimal,
    pub available_quantity: i32,
}

/// Update-product request body; omitted fields are left untouched.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub country: Option<String>,
    pub material: Option<Vec<String>>,
    pub size: Option<Size>,
    pub available_sizes: Option<Vec<Size>>,
    pub height: Option<Decimal>,
    pub width: Option<Decimal>,
    pub depth: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub color: Option<Color>,
    pub available_colors: Option<Vec<Color>>,
    pub season: Option<Vec<Season>>,
    pub sex: Option<Vec<Sex>>,
    pub age: Option<Vec<Age>>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub price: Option<Decimal>,
    pub available_quantity: Option<i32>,
}

/// Create a catalog item.
///
/// POST /api/product
///
/// # Errors
///
/// Returns `AppError` if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(_claims): CurrentUser,
    Json(body): Json<CreateProductRequest>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .create(CreateProduct {
            name: body.name,
            brand: body.brand,
            country: body.country,
            material: body.material,
            size: body.size,
            available_sizes: body.available_sizes,
            height: body.height,
            width: body.width,
            depth: body.depth,
            weight: body.weight,
            color: body.color,
            available_colors: body.available_colors,
            season: body.season,
            sex: body.sex,
            age: body.age,
            description: body.description,
            product_type: body.product_type,
            price: body.price,
            available_quantity: body.available_quantity,
        })
        .await?;

    Ok(Json(product))
}

/// Search the catalog.
///
/// GET /api/product
///
/// Query keys may repeat; a repeated `color`/`size` becomes a contains-all
/// filter over the available-colors/available-sizes lists, while a single
/// value filters the exact field. An empty query returns everything.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for unparseable filter values.
pub async fn search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Product>>> {
    let filters = filters_from_pairs(&pairs)?;
    let products = ProductRepository::new(state.pool()).search(&filters).await?;

    Ok(Json(products))
}

/// Get a single product.
///
/// GET /api/product/:id
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the product does not exist.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::BadRequest("product does not exist".to_string()))?;

    Ok(Json(product))
}

/// Merge fields into a product.
///
/// PUT /api/product/:id
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the product does not exist.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(_claims): CurrentUser,
    Path(id): Path<ProductId>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .update(
            id,
            UpdateProduct {
                name: body.name,
                brand: body.brand,
                country: body.country,
                material: body.material,
                size: body.size,
                available_sizes: body.available_sizes,
                height: body.height,
                width: body.width,
                depth: body.depth,
                weight: body.weight,
                color: body.color,
                available_colors: body.available_colors,
                season: body.season,
                sex: body.sex,
                age: body.age,
                description: body.description,
                product_type: body.product_type,
                price: body.price,
                available_quantity: body.available_quantity,
            },
        )
        .await?
        .ok_or_else(|| AppError::BadRequest("product with this id does not exist".to_string()))?;

    Ok(Json(product))
}

/// Delete a product.
///
/// DELETE /api/product/:id
///
/// References from existing carts and orders are not cleaned up.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the product does not exist.
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(_claims): CurrentUser,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let repo = ProductRepository::new(state.pool());

    let product = repo.get_by_id(id).await?.ok_or_else(|| {
        AppError::BadRequest("can not delete product because it does not exist".to_string())
    })?;
    repo.delete(id).await?;

    Ok(Json(product))
}

// =============================================================================
// Filter parsing
// =============================================================================

/// Parse a SCREAMING_SNAKE_CASE query value into one of the catalog enums.
fn parse_label<T: DeserializeOwned>(key: &str, value: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| AppError::BadRequest(format!("invalid value '{value}' for filter '{key}'")))
}

fn parse_price(key: &str, value: &str) -> Result<Decimal> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid value '{value}' for filter '{key}'")))
}

/// Build [`ProductFilters`] from raw query pairs.
///
/// Unknown keys are ignored. For scalar keys the last occurrence wins;
/// `color` and `size` switch from exact-field to contains-all semantics
/// when repeated.
fn filters_from_pairs(pairs: &[(String, String)]) -> Result<ProductFilters> {
    let mut filters = ProductFilters::default();
    let mut colors: Vec<Color> = Vec::new();
    let mut sizes: Vec<Size> = Vec::new();

    for (key, value) in pairs {
        match key.as_str() {
            "name" => filters.name = Some(value.clone()),
            "brand" => filters.brand = Some(value.clone()),
            "country" => filters.country = Some(value.clone()),
            "type" => filters.product_type = Some(value.clone()),
            "minPrice" => filters.min_price = Some(parse_price(key, value)?),
            "maxPrice" => filters.max_price = Some(parse_price(key, value)?),
            "color" => colors.push(parse_label(key, value)?),
            "size" => sizes.push(parse_label(key, value)?),
            "season" => filters.season.push(parse_label(key, value)?),
            "age" => filters.age.push(parse_label(key, value)?),
            "sex" => filters.sex.push(parse_label(key, value)?),
            "material" => filters.material.push(value.clone()),
            _ => {}
        }
    }

    match colors.len() {
        0 => {}
        1 => filters.color = colors.first().copied(),
        _ => filters.available_colors = colors,
    }
    match sizes.len() {
        0 => {}
        1 => filters.size = sizes.first().copied(),
        _ => filters.available_sizes = sizes,
    }

    Ok(filters)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_query_is_empty_filter_set() {
        let filters = filters_from_pairs(&[]).unwrap();
        assert!(filters.name.is_none());
        assert!(filters.season.is_empty());
        assert!(filters.min_price.is_none());
    }

    #[test]
    fn test_price_range() {
        let filters =
            filters_from_pairs(&pairs(&[("minPrice", "10"), ("maxPrice", "50")])).unwrap();
        assert_eq!(filters.min_price, Some(Decimal::from(10)));
        assert_eq!(filters.max_price, Some(Decimal::from(50)));
    }

    #[test]
    fn test_invalid_price_rejected() {
        let result = filters_from_pairs(&pairs(&[("minPrice", "cheap")]));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_repeated_season_accumulates() {
        let filters =
            filters_from_pairs(&pairs(&[("season", "SUMMER"), ("season", "WINTER")])).unwrap();
        assert_eq!(filters.season, vec![Season::Summer, Season::Winter]);
    }

    #[test]
    fn test_single_color_is_exact_match() {
        let filters = filters_from_pairs(&pairs(&[("color", "BLUE")])).unwrap();
        assert_eq!(filters.color, Some(Color::Blue));
        assert!(filters.available_colors.is_empty());
    }

    #[test]
    fn test_repeated_color_switches_to_contains_all() {
        let filters =
            filters_from_pairs(&pairs(&[("color", "BLUE"), ("color", "BLACK")])).unwrap();
        assert!(filters.color.is_none());
        assert_eq!(filters.available_colors, vec![Color::Blue, Color::Black]);
    }

    #[test]
    fn test_invalid_enum_label_rejected() {
        let result = filters_from_pairs(&pairs(&[("season", "MONSOON")]));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let filters = filters_from_pairs(&pairs(&[("page", "2"), ("brand", "Acme")])).unwrap();
        assert_eq!(filters.brand.as_deref(), Some("Acme"));
    }
}
