//! # Collaborator Traits
//!
//! What the cart protocol needs from the outside world. `shop_db::Database`
//! implements all three; tests swap in memory-backed or failing doubles.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartService                                                            │
//! │    ├── Arc<dyn ProductCatalog>  find_active_product                     │
//! │    ├── Arc<dyn CartStore>       find_cart_by_customer / create / save   │
//! │    └── Arc<dyn OrderStore>      place_order                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use shop_core::{Cart, Order, Product};
use shop_db::{Database, DbError};

/// Active product lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns the product only if it exists and is active.
    async fn find_active_product(&self, product_id: &str) -> Result<Option<Product>, DbError>;
}

/// Cart persistence. A loaded cart always carries all of its items.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_cart_by_customer(&self, customer_id: &str) -> Result<Option<Cart>, DbError>;

    /// Stores a cart that does not exist yet, items included.
    async fn create_cart(&self, cart: &Cart) -> Result<(), DbError>;

    /// Replaces the stored cart atomically.
    async fn save_cart(&self, cart: &Cart) -> Result<(), DbError>;
}

/// Order persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Records `order` and stores the emptied `cart` atomically.
    async fn place_order(&self, order: &Order, cart: &Cart) -> Result<(), DbError>;
}

// =============================================================================
// SQLite Implementations
// =============================================================================

#[async_trait]
impl ProductCatalog for Database {
    async fn find_active_product(&self, product_id: &str) -> Result<Option<Product>, DbError> {
        self.products().get_active_by_id(product_id).await
    }
}

#[async_trait]
impl CartStore for Database {
    async fn find_cart_by_customer(&self, customer_id: &str) -> Result<Option<Cart>, DbError> {
        self.carts().find_by_customer(customer_id).await
    }

    async fn create_cart(&self, cart: &Cart) -> Result<(), DbError> {
        self.carts().create(cart).await
    }

    async fn save_cart(&self, cart: &Cart) -> Result<(), DbError> {
        self.carts().save(cart).await
    }
}

#[async_trait]
impl OrderStore for Database {
    async fn place_order(&self, order: &Order, cart: &Cart) -> Result<(), DbError> {
        self.orders().place(order, cart).await
    }
}

// =============================================================================
// Test Doubles
// =============================================================================
