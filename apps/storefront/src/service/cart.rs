//! # Cart Service
//!
//! Orchestrates the cart aggregate with the catalog and storage.
//!
//! ## Mutation Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  every mutation:                                                        │
//! │                                                                         │
//! │  1. load cart (with items) for ctx.customer_id                          │
//! │  2. apply the change in memory (shop_core::Cart)  ── may fail ──┐       │
//! │  3. write the whole cart back in one transaction               │       │
//! │                                                                 ▼       │
//! │                                     nothing written, cart unchanged     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cart States
//! ```text
//!   NONE ──add_to_cart──► EXISTS(empty) ──► EXISTS(nonempty)
//!                               ▲                   │
//!                               └── remove / update(<1) / clear / order ──┘
//! ```
//! Carts are created lazily by the first successful add and never deleted.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use shop_core::{compute_summary, Cart, CartItem, CoreError, DiscountSettings, Order, PurchaseSummary, RequestContext};
use shop_db::Database;
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::store::{CartStore, OrderStore, ProductCatalog};

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    /// The recorded order.
    pub order: Order,

    /// The summary the order was priced from.
    pub summary: PurchaseSummary,
}

/// Cart operations for one storefront.
///
/// Cheap to clone; clones share collaborators and settings.
#[derive(Clone)]
pub struct CartService {
    catalog: Arc<dyn ProductCatalog>,
    carts: Arc<dyn CartStore>,
    orders: Arc<dyn OrderStore>,
    settings: Arc<DiscountSettings>,
}

impl CartService {
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderStore>,
        settings: DiscountSettings,
    ) -> Self {
        CartService {
            catalog,
            carts,
            orders,
            settings: Arc::new(settings),
        }
    }

    /// Wires every collaborator to the same database.
    pub fn from_database(db: Database, settings: DiscountSettings) -> Self {
        let db = Arc::new(db);
        CartService::new(db.clone(), db.clone(), db, settings)
    }

    /// The discount settings this service prices with.
    pub fn settings(&self) -> &DiscountSettings {
        &self.settings
    }

    /// Adds one unit of `product_id` to the customer's cart.
    ///
    /// ## Behavior
    /// - Missing or inactive product: `ProductNotFound`
    /// - No stock: `OutOfStock`
    /// - Already in the cart: quantity + 1, snapshot kept
    /// - Otherwise a new line priced from the product right now
    ///
    /// The cart is created on the first successful add. On any failure
    /// nothing is written.
    pub async fn add_to_cart(&self, ctx: &RequestContext, product_id: &str) -> Result<CartItem, ServiceError> {
        debug!(customer_id = %ctx.customer_id, product_id = %product_id, "add_to_cart");

        let product = self
            .catalog
            .find_active_product(product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let now = Utc::now();
        let existing = self.carts.find_cart_by_customer(&ctx.customer_id).await?;
        let is_new = existing.is_none();
        let mut cart = existing.unwrap_or_else(|| Cart::new(ctx, now));

        let item = cart.add_product(&product, &ctx.actor, now)?.clone();

        if is_new {
            self.carts.create_cart(&cart).await?;
        } else {
            self.carts.save_cart(&cart).await?;
        }

        debug!(
            customer_id = %ctx.customer_id,
            cart_item_id = %item.id,
            quantity = item.quantity,
            "Added to cart"
        );
        Ok(item)
    }

    /// Removes a line from the customer's cart.
    pub async fn remove_from_cart(&self, ctx: &RequestContext, cart_item_id: &str) -> Result<(), ServiceError> {
        debug!(customer_id = %ctx.customer_id, cart_item_id = %cart_item_id, "remove_from_cart");

        let mut cart = self.require_cart(ctx).await?;
        cart.remove_item(cart_item_id, &ctx.actor, Utc::now())?;
        self.carts.save_cart(&cart).await?;

        Ok(())
    }

    /// Sets a line's quantity. A quantity below 1 removes the line.
    pub async fn update_quantity(
        &self,
        ctx: &RequestContext,
        cart_item_id: &str,
        quantity: i64,
    ) -> Result<(), ServiceError> {
        debug!(
            customer_id = %ctx.customer_id,
            cart_item_id = %cart_item_id,
            quantity,
            "update_quantity"
        );

        let mut cart = self.require_cart(ctx).await?;
        cart.update_quantity(cart_item_id, quantity, &ctx.actor, Utc::now())?;
        self.carts.save_cart(&cart).await?;

        Ok(())
    }

    /// Empties the customer's cart. Succeeds without doing anything when the
    /// customer has no cart.
    pub async fn clear_cart(&self, ctx: &RequestContext) -> Result<(), ServiceError> {
        debug!(customer_id = %ctx.customer_id, "clear_cart");

        let Some(mut cart) = self.carts.find_cart_by_customer(&ctx.customer_id).await? else {
            return Ok(());
        };

        let removed = cart.clear(&ctx.actor, Utc::now());
        self.carts.save_cart(&cart).await?;

        debug!(customer_id = %ctx.customer_id, removed, "Cart cleared");
        Ok(())
    }

    /// Total units in the cart, for the cart badge.
    ///
    /// Never fails: storage errors are logged and reported as 0.
    pub async fn cart_item_count(&self, ctx: &RequestContext) -> i64 {
        match self.carts.find_cart_by_customer(&ctx.customer_id).await {
            Ok(Some(cart)) => cart.total_quantity(),
            Ok(None) => 0,
            Err(err) => {
                warn!(customer_id = %ctx.customer_id, error = %err, "Cart item count unavailable");
                0
            }
        }
    }

    /// Prices the customer's cart as it is right now.
    pub async fn purchase_summary(&self, ctx: &RequestContext) -> Result<PurchaseSummary, ServiceError> {
        debug!(customer_id = %ctx.customer_id, "purchase_summary");

        let cart = self.carts.find_cart_by_customer(&ctx.customer_id).await?;
        Ok(compute_summary(cart.as_ref(), &self.settings))
    }

    /// Records an order from the current summary and empties the cart.
    ///
    /// ## Steps
    /// 1. Re-read the cart and price it (never trusts an earlier summary)
    /// 2. Nothing to buy: `EmptyCart`
    /// 3. Freeze the summary into an `Order`
    /// 4. Store the order and the emptied cart in one transaction
    pub async fn place_order(&self, ctx: &RequestContext) -> Result<OrderConfirmation, ServiceError> {
        debug!(customer_id = %ctx.customer_id, "place_order");

        let Some(mut cart) = self.carts.find_cart_by_customer(&ctx.customer_id).await? else {
            return Err(CoreError::EmptyCart.into());
        };

        let summary = compute_summary(Some(&cart), &self.settings);
        if summary.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let now = Utc::now();
        let order = Order::from_summary(ctx, &summary, now);
        cart.clear(&ctx.actor, now);

        self.orders.place_order(&order, &cart).await?;

        debug!(
            customer_id = %ctx.customer_id,
            order_id = %order.id,
            final_total = %summary.final_total,
            "Checkout complete"
        );
        Ok(OrderConfirmation { order, summary })
    }

    async fn require_cart(&self, ctx: &RequestContext) -> Result<Cart, ServiceError> {
        self.carts
            .find_cart_by_customer(&ctx.customer_id)
            .await?
            .ok_or_else(|| CoreError::CartNotFound(ctx.customer_id.clone()).into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================


// =============================================================================
// SQLite-backed Flows
// =============================================================================

#[cfg(test)]
mod sqlite_tests {
    use super::*;
    use crate::error::ErrorKind;
    use shop_core::message::{render_discount_message, render_order_confirmation};
    use shop_core::{Money, Product};
    use shop_db::DbConfig;
    use uuid::Uuid;

    fn product(name: &str, price_cents: i64, discount_bps: u32, stock: i64) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: Some(format!("{name} for the home office")),
            category: "Office".to_string(),
            price_cents,
            discount_bps,
            is_active: true,
            stock_quantity: stock,
            created_at: Utc::now(),
            created_by: "seed".to_string(),
            updated_at: None,
            updated_by: None,
        }
    }

    async fn setup(products: &[&Product]) -> (Database, CartService) {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        for p in products {
            db.products().insert(p).await.unwrap();
        }
        let service = CartService::from_database(db.clone(), DiscountSettings::default());
        (db, service)
    }

    fn customer(id: &str) -> RequestContext {
        RequestContext::new(id, "web")
    }

    #[tokio::test]
    async fn test_checkout_applies_product_and_cart_discounts() {
        let chair = product("Office Chair", 300_000, 1000, 10);
        let (db, service) = setup(&[&chair]).await;
        let alice = customer("alice");

        service.add_to_cart(&alice, &chair.id).await.unwrap();
        let item = service.add_to_cart(&alice, &chair.id).await.unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(service.cart_item_count(&alice).await, 2);

        let summary = service.purchase_summary(&alice).await.unwrap();
        assert_eq!(summary.sub_total, Money::from_units(5400));
        assert_eq!(summary.discount_amount, Money::from_units(540));
        assert_eq!(summary.final_total, Money::from_units(4860));
        assert_eq!(summary.original_total, Money::from_units(6000));
        assert_eq!(summary.product_discount_saving, Money::from_units(600));
        assert_eq!(summary.total_saving, Money::from_units(1140));
        assert_eq!(
            render_discount_message(&summary.discount_notice(), "₹"),
            "🎉 10% cart discount applied!"
        );

        let confirmation = service.place_order(&alice).await.unwrap();
        assert_eq!(
            render_order_confirmation(confirmation.summary.total_saving, "₹"),
            "Order placed successfully! You saved ₹1,140.00"
        );

        let stored = db.orders().get_by_id(&confirmation.order.id).await.unwrap().unwrap();
        assert_eq!(stored.final_total_cents, 486_000);
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].quantity, 2);

        assert_eq!(service.cart_item_count(&alice).await, 0);
        let after = service.purchase_summary(&alice).await.unwrap();
        assert!(after.items.is_empty());
        assert_eq!(after.final_total, Money::zero());
    }

    #[tokio::test]
    async fn test_below_threshold_shows_shortfall() {
        let pad = product("Mouse Pad", 100_000, 0, 10);
        let (_db, service) = setup(&[&pad]).await;
        let alice = customer("alice");

        service.add_to_cart(&alice, &pad.id).await.unwrap();

        let summary = service.purchase_summary(&alice).await.unwrap();
        assert!(!summary.cart_discount_applied);
        assert_eq!(summary.discount_amount, Money::zero());
        assert_eq!(summary.final_total, Money::from_units(1000));
        assert_eq!(
            render_discount_message(&summary.discount_notice(), "₹"),
            "Add ₹4,000.00 more to unlock 10% cart discount!"
        );
    }

    #[tokio::test]
    async fn test_price_change_does_not_reprice_existing_line() {
        let chair = product("Office Chair", 300_000, 1000, 10);
        let (db, service) = setup(&[&chair]).await;
        let alice = customer("alice");

        service.add_to_cart(&alice, &chair.id).await.unwrap();

        let mut repriced = chair.clone();
        repriced.price_cents = 500_000;
        db.products().update(&repriced, "admin").await.unwrap();

        let item = service.add_to_cart(&alice, &chair.id).await.unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price_cents, 270_000);
        assert_eq!(item.original_price_cents, 300_000);

        let summary = service.purchase_summary(&alice).await.unwrap();
        assert_eq!(summary.sub_total, Money::from_units(5400));
    }

    #[tokio::test]
    async fn test_out_of_stock_product_is_never_added() {
        let lamp = product("Desk Lamp", 150_000, 0, 0);
        let (db, service) = setup(&[&lamp]).await;
        let alice = customer("alice");

        let err = service.add_to_cart(&alice, &lamp.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfStock);
        assert_eq!(err.to_string(), "'Desk Lamp' is out of stock");

        assert!(db.carts().find_by_customer("alice").await.unwrap().is_none());
        assert_eq!(service.cart_item_count(&alice).await, 0);
    }

    #[tokio::test]
    async fn test_other_customers_items_cannot_be_touched() {
        let chair = product("Office Chair", 300_000, 1000, 10);
        let pad = product("Mouse Pad", 100_000, 0, 10);
        let (_db, service) = setup(&[&chair, &pad]).await;
        let alice = customer("alice");
        let bob = customer("bob");

        let alices_item = service.add_to_cart(&alice, &chair.id).await.unwrap();
        service.add_to_cart(&bob, &pad.id).await.unwrap();

        let err = service.update_quantity(&bob, &alices_item.id, 5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CartItemNotFound);

        let err = service.remove_from_cart(&bob, &alices_item.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CartItemNotFound);

        assert_eq!(service.cart_item_count(&alice).await, 1);
        assert_eq!(service.cart_item_count(&bob).await, 1);
    }

    #[tokio::test]
    async fn test_updates_and_removals_persist_in_line_order() {
        let chair = product("Office Chair", 300_000, 1000, 10);
        let pad = product("Mouse Pad", 100_000, 0, 10);
        let (_db, service) = setup(&[&chair, &pad]).await;
        let alice = customer("alice");

        let chair_line = service.add_to_cart(&alice, &chair.id).await.unwrap();
        let pad_line = service.add_to_cart(&alice, &pad.id).await.unwrap();

        service.update_quantity(&alice, &pad_line.id, 3).await.unwrap();
        let summary = service.purchase_summary(&alice).await.unwrap();
        let names: Vec<_> = summary.items.iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(names, vec!["Office Chair", "Mouse Pad"]);
        assert_eq!(service.cart_item_count(&alice).await, 4);

        service.update_quantity(&alice, &chair_line.id, 0).await.unwrap();
        service.remove_from_cart(&alice, &pad_line.id).await.unwrap();
        assert_eq!(service.cart_item_count(&alice).await, 0);

        service.clear_cart(&alice).await.unwrap();
        let err = service.place_order(&alice).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyCart);
    }
}
