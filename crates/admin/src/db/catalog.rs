//! Catalog repository: product CRUD for the admin panel.
//!
//! The storefront reads this same `storefront.product` table; all writes go
//! through here.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use primrose_core::ProductId;

use super::RepositoryError;

/// A catalog product as managed from the admin panel.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogProduct {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub price: f64,
    pub count_in_stock: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable product fields, as submitted from the product form.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub slug: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub price: f64,
    pub count_in_stock: i32,
    pub description: String,
}

const PRODUCT_COLUMNS: &str =
    "id, slug, name, category, brand, image, price, count_in_stock, description, \
     created_at, updated_at";

/// Repository for catalog management.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<CatalogProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, CatalogProduct>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<CatalogProduct>, RepositoryError> {
        let row = sqlx::query_as::<_, CatalogProduct>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    pub async fn create(&self, input: &ProductInput) -> Result<CatalogProduct, RepositoryError> {
        let row = sqlx::query_as::<_, CatalogProduct>(&format!(
            r#"
            INSERT INTO storefront.product
                (slug, name, category, brand, image, price, count_in_stock, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&input.slug)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.brand)
        .bind(&input.image)
        .bind(input.price)
        .bind(input.count_in_stock)
        .bind(&input.description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row)
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug is already taken.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<CatalogProduct, RepositoryError> {
        let row = sqlx::query_as::<_, CatalogProduct>(&format!(
            r#"
            UPDATE storefront.product
            SET slug = $2, name = $3, category = $4, brand = $5, image = $6,
                price = $7, count_in_stock = $8, description = $9, updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.as_i32())
        .bind(&input.slug)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.brand)
        .bind(&input.image)
        .bind(input.price)
        .bind(input.count_in_stock)
        .bind(&input.description)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM storefront.product WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
