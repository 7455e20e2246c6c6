//! Product repository for database operations.
//!
//! Search builds its WHERE clause dynamically with `QueryBuilder`; every
//! value is bound, never interpolated.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use corduroy_core::{Age, Color, ProductId, Season, Sex, Size};

use super::RepositoryError;
use crate::models::Product;

/// Columns selected for the `Product` domain type.
const PRODUCT_COLUMNS: &str = "id, name, brand, country, material, size, available_sizes, \
     height, width, depth, weight, color, available_colors, season, sex, age, \
     description, product_type, price, available_quantity, created_at, updated_at";

/// Parameters for creating a product.
///
/// Optional fields are stored as NULL (or an empty array) when absent.
pub struct CreateProduct {
    pub name: String,
    pub brand: String,
    pub country: String,
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
    pub product_type: String,
    pub price: Decimal,
    pub available_quantity: i32,
}

/// Partial update for a product. `None` leaves the stored value untouched.
#[derive(Default)]
pub struct UpdateProduct {
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
    pub product_type: Option<String>,
    pub price: Option<Decimal>,
    pub available_quantity: Option<i32>,
}

/// Catalog search filters.
///
/// Scalar filters are exact matches; the list filters use contains-all
/// semantics (a product matches only if its array holds every given value).
#[derive(Debug, Default, Clone)]
pub struct ProductFilters {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub country: Option<String>,
    pub product_type: Option<String>,
    pub color: Option<Color>,
    pub size: Option<Size>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub season: Vec<Season>,
    pub age: Vec<Age>,
    pub sex: Vec<Sex>,
    pub material: Vec<String>,
    pub available_colors: Vec<Color>,
    pub available_sizes: Vec<Size>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a product. Name, brand, country, and type are lower-cased
    /// before storage.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, params: CreateProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (
                 name, brand, country, material, size, available_sizes,
                 height, width, depth, weight, color, available_colors,
                 season, sex, age, description, product_type, price,
                 available_quantity
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                     $14, $15, $16, $17, $18, $19)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(params.name.to_lowercase())
        .bind(params.brand.to_lowercase())
        .bind(params.country.to_lowercase())
        .bind(&params.material)
        .bind(params.size)
        .bind(&params.available_sizes)
        .bind(params.height)
        .bind(params.width)
        .bind(params.depth)
        .bind(params.weight)
        .bind(params.color)
        .bind(&params.available_colors)
        .bind(&params.season)
        .bind(&params.sex)
        .bind(&params.age)
        .bind(params.description.as_deref())
        .bind(params.product_type.to_lowercase())
        .bind(params.price)
        .bind(params.available_quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Count how many of the given ids exist in the catalog.
    ///
    /// Duplicate ids count once; the caller compares against the deduplicated
    /// length of its input.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_existing(&self, ids: &[ProductId]) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE id = ANY($1)")
                .bind(ids)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Search the catalog.
    ///
    /// An empty filter set returns the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, filters: &ProductFilters) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"
        ));

        // Exact matches against the lower-cased stored form
        if let Some(name) = &filters.name {
            query.push(" AND name = ").push_bind(name.to_lowercase());
        }
        if let Some(brand) = &filters.brand {
            query.push(" AND brand = ").push_bind(brand.to_lowercase());
        }
        if let Some(country) = &filters.country {
            query
                .push(" AND country = ")
                .push_bind(country.to_lowercase());
        }
        if let Some(product_type) = &filters.product_type {
            query
                .push(" AND product_type = ")
                .push_bind(product_type.to_lowercase());
        }
        if let Some(color) = filters.color {
            query.push(" AND color = ").push_bind(color);
        }
        if let Some(size) = filters.size {
            query.push(" AND size = ").push_bind(size);
        }

        // Inclusive price range
        if let Some(min_price) = filters.min_price {
            query.push(" AND price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filters.max_price {
            query.push(" AND price <= ").push_bind(max_price);
        }

        // Contains-all list filters (array containment)
        if !filters.season.is_empty() {
            query.push(" AND season @> ").push_bind(filters.season.clone());
        }
        if !filters.age.is_empty() {
            query.push(" AND age @> ").push_bind(filters.age.clone());
        }
        if !filters.sex.is_empty() {
            query.push(" AND sex @> ").push_bind(filters.sex.clone());
        }
        if !filters.material.is_empty() {
            query
                .push(" AND material @> ")
                .push_bind(filters.material.clone());
        }
        if !filters.available_colors.is_empty() {
            query
                .push(" AND available_colors @> ")
                .push_bind(filters.available_colors.clone());
        }
        if !filters.available_sizes.is_empty() {
            query
                .push(" AND available_sizes @> ")
                .push_bind(filters.available_sizes.clone());
        }

        query.push(" ORDER BY created_at ASC");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Merge the given fields into a product.
    ///
    /// Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        params: UpdateProduct,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET
                 name = COALESCE($2, name),
                 brand = COALESCE($3, brand),
                 country = COALESCE($4, country),
                 material = COALESCE($5, material),
                 size = COALESCE($6, size),
                 available_sizes = COALESCE($7, available_sizes),
                 height = COALESCE($8, height),
                 width = COALESCE($9, width),
                 depth = COALESCE($10, depth),
                 weight = COALESCE($11, weight),
                 color = COALESCE($12, color),
                 available_colors = COALESCE($13, available_colors),
                 season = COALESCE($14, season),
                 sex = COALESCE($15, sex),
                 age = COALESCE($16, age),
                 description = COALESCE($17, description),
                 product_type = COALESCE($18, product_type),
                 price = COALESCE($19, price),
                 available_quantity = COALESCE($20, available_quantity),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(params.name.map(|s| s.to_lowercase()))
        .bind(params.brand.map(|s| s.to_lowercase()))
        .bind(params.country.map(|s| s.to_lowercase()))
        .bind(params.material)
        .bind(params.size)
        .bind(params.available_sizes)
        .bind(params.height)
        .bind(params.width)
        .bind(params.depth)
        .bind(params.weight)
        .bind(params.color)
        .bind(params.available_colors)
        .bind(params.season)
        .bind(params.sex)
        .bind(params.age)
        .bind(params.description)
        .bind(params.product_type.map(|s| s.to_lowercase()))
        .bind(params.price)
        .bind(params.available_quantity)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Delete a product.
    ///
    /// Returns `true` if a row was deleted. Does not clean references from
    /// existing carts or orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
