//! Catalog browsing over the product repository.

use shop_core::validation::validate_category;
use shop_core::{CoreError, Product};
use shop_db::{Database, ProductRepository};
use tracing::debug;

use crate::error::ServiceError;

/// Read-only access to active products.
#[derive(Debug, Clone)]
pub struct CatalogService {
    products: ProductRepository,
}

impl CatalogService {
    pub fn new(db: &Database) -> Self {
        CatalogService { products: db.products() }
    }

    /// Active products, optionally narrowed to one category.
    pub async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, ServiceError> {
        debug!(category = ?category, "list_products");

        match category {
            Some(category) => {
                validate_category(category).map_err(CoreError::from)?;
                Ok(self.products.list_by_category(category.trim()).await?)
            }
            None => Ok(self.products.list_active().await?),
        }
    }

    /// Distinct categories of active products.
    pub async fn categories(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.products.categories().await?)
    }

    /// One active product.
    pub async fn get_product(&self, product_id: &str) -> Result<Product, ServiceError> {
        self.products
            .get_active_by_id(product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()).into())
    }
}
