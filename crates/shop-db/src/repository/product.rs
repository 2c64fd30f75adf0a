//! # Product Repository
//!
//! Catalog reads used by browsing and by the cart protocol, plus the writes
//! used by seeding.
//!
//! ## Visibility
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_active = 1   listed, can be added to carts                          │
//! │  is_active = 0   soft-deleted: hidden from listings and from           │
//! │                  get_active_by_id (add_to_cart sees ProductNotFound)    │
//! │                                                                         │
//! │  Existing cart lines keep their snapshot either way.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use shop_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists active products ordered by category, then name.
    pub async fn list_active(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id, name, description, category,
                price_cents, discount_bps, is_active, stock_quantity,
                created_at, created_by, updated_at, updated_by
            FROM products
            WHERE is_active = 1
            ORDER BY category, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed active products");
        Ok(products)
    }

    /// Lists active products of one category ordered by name.
    pub async fn list_by_category(&self, category: &str) -> DbResult<Vec<Product>> {
        debug!(category = %category, "Listing products by category");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id, name, description, category,
                price_cents, discount_bps, is_active, stock_quantity,
                created_at, created_by, updated_at, updated_by
            FROM products
            WHERE is_active = 1 AND category = ?1
            ORDER BY name
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Distinct categories that have at least one active product, ascending.
    pub async fn categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM products WHERE is_active = 1 ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a product by ID only if it is active.
    pub async fn get_active_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id, name, description, category,
                price_cents, discount_bps, is_active, stock_quantity,
                created_at, created_by, updated_at, updated_by
            FROM products
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by ID, active or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id, name, description, category,
                price_cents, discount_bps, is_active, stock_quantity,
                created_at, created_by, updated_at, updated_by
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, category,
                price_cents, discount_bps, is_active, stock_quantity,
                created_at, created_by, updated_at, updated_by
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8,
                ?9, ?10, ?11, ?12
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.discount_bps)
        .bind(product.is_active)
        .bind(product.stock_quantity)
        .bind(product.created_at)
        .bind(&product.created_by)
        .bind(product.updated_at)
        .bind(&product.updated_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a product's catalog fields and stamps `updated_at` /
    /// `updated_by`.
    ///
    /// Cart lines created before the update keep their old price snapshot.
    pub async fn update(&self, product: &Product, actor: &str) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                category = ?4,
                price_cents = ?5,
                discount_bps = ?6,
                is_active = ?7,
                stock_quantity = ?8,
                updated_at = ?9,
                updated_by = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.discount_bps)
        .bind(product.is_active)
        .bind(product.stock_quantity)
        .bind(Utc::now())
        .bind(actor)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Soft-deletes a product (sets `is_active = 0`).
    pub async fn soft_delete(&self, id: &str, actor: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let result = sqlx::query(
            "UPDATE products SET is_active = 0, updated_at = ?2, updated_by = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .bind(actor)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products, active or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
