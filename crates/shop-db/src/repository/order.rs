//! # Order Repository
//!
//! ## Placement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place(order, emptied_cart)  ── one transaction ──                      │
//! │                                                                         │
//! │  1. INSERT INTO orders        (totals frozen from the summary)          │
//! │  2. INSERT INTO order_items   (one per cart line, snapshot copied)      │
//! │  3. write emptied cart        (header stamped, item rows deleted)       │
//! │  4. COMMIT                                                              │
//! │                                                                         │
//! │  Either the order exists and the cart is empty, or neither happened.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::cart::write_cart;
use shop_core::{Cart, Order, OrderItem};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Records `order` and writes `cart` (already emptied by the caller) in
    /// one transaction.
    pub async fn place(&self, order: &Order, cart: &Cart) -> DbResult<()> {
        debug!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            items = order.items.len(),
            "Placing order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, order_date, status,
                original_total_cents, subtotal_cents, cart_discount_bps, cart_discount_cents,
                final_total_cents, total_saving_cents, created_at, created_by
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8,
                ?9, ?10, ?11, ?12
            )
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.order_date)
        .bind(order.status)
        .bind(order.original_total_cents)
        .bind(order.subtotal_cents)
        .bind(order.cart_discount_bps)
        .bind(order.cart_discount_cents)
        .bind(order.final_total_cents)
        .bind(order.total_saving_cents)
        .bind(order.created_at)
        .bind(&order.created_by)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, product_name,
                    original_price_cents, discount_bps, unit_price_cents,
                    quantity, line_total_cents, created_at, created_by
                ) VALUES (
                    ?1, ?2, ?3, ?4,
                    ?5, ?6, ?7,
                    ?8, ?9, ?10, ?11
                )
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(item.original_price_cents)
            .bind(item.discount_bps)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(item.line_total_cents)
            .bind(item.created_at)
            .bind(&item.created_by)
            .execute(&mut *tx)
            .await?;
        }

        write_cart(&mut *tx, cart).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            final_total_cents = order.final_total_cents,
            "Order placed"
        );
        Ok(())
    }

    /// Gets an order with its items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT
                id, customer_id, order_date, status,
                original_total_cents, subtotal_cents, cart_discount_bps, cart_discount_cents,
                final_total_cents, total_saving_cents, created_at, created_by
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        order.items = self.get_items(&order.id).await?;
        Ok(Some(order))
    }

    /// Gets the items of an order in placement order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT
                id, order_id, product_id, product_name,
                original_price_cents, discount_bps, unit_price_cents,
                quantity, line_total_cents, created_at, created_by
            FROM order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists a customer's orders, newest first. Items are not loaded.
    pub async fn list_for_customer(&self, customer_id: &str) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT
                id, customer_id, order_date, status,
                original_total_cents, subtotal_cents, cart_discount_bps, cart_discount_cents,
                final_total_cents, total_saving_cents, created_at, created_by
            FROM orders
            WHERE customer_id = ?1
            ORDER BY order_date DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}
