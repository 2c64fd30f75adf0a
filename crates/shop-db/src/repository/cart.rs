//! # Cart Repository
//!
//! Loads and saves a customer's cart as one aggregate.
//!
//! ## Save Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save(cart)  ── one transaction ──                                      │
//! │                                                                         │
//! │  1. UPDATE carts SET updated_at, updated_by WHERE id = cart.id          │
//! │  2. DELETE FROM cart_items WHERE cart_id = cart.id                      │
//! │  3. INSERT every line of cart.items (in order)                          │
//! │  4. COMMIT                                                              │
//! │                                                                         │
//! │  Any failure rolls the whole write back: the stored cart is either the  │
//! │  old state or the new state, never a mix.                               │
//! │                                                                         │
//! │  Two requests racing on the same customer: last commit wins.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are re-inserted in memory order, so `ORDER BY rowid` on load gives
//! back the same line order.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use shop_core::{Cart, CartItem};

/// Repository for cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Loads the customer's cart together with all of its items.
    pub async fn find_by_customer(&self, customer_id: &str) -> DbResult<Option<Cart>> {
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, customer_id, created_at, created_by, updated_at, updated_by
            FROM carts
            WHERE customer_id = ?1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut cart) = cart else {
            debug!(customer_id = %customer_id, "No cart for customer");
            return Ok(None);
        };

        cart.items = self.get_items(&cart.id).await?;

        debug!(
            customer_id = %customer_id,
            cart_id = %cart.id,
            items = cart.items.len(),
            "Loaded cart"
        );
        Ok(Some(cart))
    }

    /// Gets all items of a cart in insertion order.
    pub async fn get_items(&self, cart_id: &str) -> DbResult<Vec<CartItem>> {
        let items = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT
                id, cart_id, product_id, product_name,
                original_price_cents, discount_bps, unit_price_cents, quantity,
                created_at, created_by, updated_at, updated_by
            FROM cart_items
            WHERE cart_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a new cart header and any items it already holds.
    ///
    /// Fails with `UniqueViolation` if the customer already has a cart.
    pub async fn create(&self, cart: &Cart) -> DbResult<()> {
        debug!(customer_id = %cart.customer_id, cart_id = %cart.id, "Creating cart");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO carts (id, customer_id, created_at, created_by, updated_at, updated_by)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&cart.id)
        .bind(&cart.customer_id)
        .bind(cart.created_at)
        .bind(&cart.created_by)
        .bind(cart.updated_at)
        .bind(&cart.updated_by)
        .execute(&mut *tx)
        .await?;

        insert_items(&mut *tx, &cart.items).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        Ok(())
    }

    /// Replaces the stored cart with `cart` in one transaction.
    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        debug!(
            customer_id = %cart.customer_id,
            cart_id = %cart.id,
            items = cart.items.len(),
            "Saving cart"
        );

        let mut tx = self.pool.begin().await?;
        write_cart(&mut *tx, cart).await?;
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }
}

// =============================================================================
// Shared Writers (also used by order placement)
// =============================================================================

/// Overwrites the cart header audit fields and its item rows.
pub(crate) async fn write_cart(conn: &mut SqliteConnection, cart: &Cart) -> DbResult<()> {
    let result = sqlx::query("UPDATE carts SET updated_at = ?2, updated_by = ?3 WHERE id = ?1")
        .bind(&cart.id)
        .bind(cart.updated_at)
        .bind(&cart.updated_by)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Cart", &cart.id));
    }

    sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1")
        .bind(&cart.id)
        .execute(&mut *conn)
        .await?;

    insert_items(conn, &cart.items).await
}

async fn insert_items(conn: &mut SqliteConnection, items: &[CartItem]) -> DbResult<()> {
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO cart_items (
                id, cart_id, product_id, product_name,
                original_price_cents, discount_bps, unit_price_cents, quantity,
                created_at, created_by, updated_at, updated_by
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8,
                ?9, ?10, ?11, ?12
            )
            "#,
        )
        .bind(&item.id)
        .bind(&item.cart_id)
        .bind(&item.product_id)
        .bind(&item.product_name)
        .bind(item.original_price_cents)
        .bind(item.discount_bps)
        .bind(item.unit_price_cents)
        .bind(item.quantity)
        .bind(item.created_at)
        .bind(&item.created_by)
        .bind(item.updated_at)
        .bind(&item.updated_by)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, database, seeded};
    use crate::DbError;
    use chrono::Utc;
    use shop_core::Cart;

    #[tokio::test]
    async fn test_missing_cart_is_none() {
        let db = database().await;

        assert!(db.carts().find_by_customer("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_and_load_with_items() {
        let db = database().await;
        let chair = seeded(&db, "Office Chair", 300_000, 1000).await;
        let ctx = ctx("customer-1");

        let mut cart = Cart::new(&ctx, Utc::now());
        cart.add_product(&chair, &ctx.actor, Utc::now()).unwrap();
        db.carts().create(&cart).await.unwrap();

        let loaded = db.carts().find_by_customer("customer-1").await.unwrap().unwrap();
        assert_eq!(loaded.id, cart.id);
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].unit_price_cents, 270_000);
        assert_eq!(loaded.items[0].discount_bps, 1000);
        assert_eq!(loaded.items[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_save_replaces_items_and_keeps_order() {
        let db = database().await;
        let chair = seeded(&db, "Office Chair", 300_000, 1000).await;
        let lamp = seeded(&db, "Desk Lamp", 150_000, 0).await;
        let pen = seeded(&db, "Pen", 2_500, 0).await;
        let ctx = ctx("customer-1");

        let mut cart = Cart::new(&ctx, Utc::now());
        db.carts().create(&cart).await.unwrap();

        cart.add_product(&chair, &ctx.actor, Utc::now()).unwrap();
        cart.add_product(&lamp, &ctx.actor, Utc::now()).unwrap();
        cart.add_product(&pen, &ctx.actor, Utc::now()).unwrap();
        cart.add_product(&chair, &ctx.actor, Utc::now()).unwrap();
        db.carts().save(&cart).await.unwrap();

        let loaded = db.carts().find_by_customer("customer-1").await.unwrap().unwrap();
        let names: Vec<&str> = loaded.items.iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(names, vec!["Office Chair", "Desk Lamp", "Pen"]);
        assert_eq!(loaded.items[0].quantity, 2);
        assert_eq!(loaded.updated_by.as_deref(), Some("tester"));

        let lamp_line = loaded.items[1].id.clone();
        cart.remove_item(&lamp_line, &ctx.actor, Utc::now()).unwrap();
        db.carts().save(&cart).await.unwrap();

        let loaded = db.carts().find_by_customer("customer-1").await.unwrap().unwrap();
        assert_eq!(loaded.items.len(), 2);
        assert!(loaded.find_item(&lamp_line).is_none());
    }

    #[tokio::test]
    async fn test_second_cart_for_customer_is_rejected() {
        let db = database().await;
        let ctx = ctx("customer-1");

        db.carts().create(&Cart::new(&ctx, Utc::now())).await.unwrap();
        let err = db.carts().create(&Cart::new(&ctx, Utc::now())).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_save_unknown_cart_is_not_found() {
        let db = database().await;
        let cart = Cart::new(&ctx("customer-1"), Utc::now());

        let err = db.carts().save(&cart).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back() {
        let db = database().await;
        let chair = seeded(&db, "Office Chair", 300_000, 1000).await;
        let ctx = ctx("customer-1");

        let mut cart = Cart::new(&ctx, Utc::now());
        cart.add_product(&chair, &ctx.actor, Utc::now()).unwrap();
        db.carts().create(&cart).await.unwrap();

        // A line pointing at a product that does not exist violates the FK
        let mut ghost = cart.items[0].clone();
        ghost.id = "ghost-line".to_string();
        ghost.product_id = "ghost-product".to_string();
        cart.items.push(ghost);

        let err = db.carts().save(&cart).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        let loaded = db.carts().find_by_customer("customer-1").await.unwrap().unwrap();
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].product_id, chair.id);
    }
}
