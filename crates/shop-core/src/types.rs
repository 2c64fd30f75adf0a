//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  order_id (FK)  │       │
//! │  │  category       │   │  customer_id    │   │  name snapshot  │       │
//! │  │  price_cents    │   │  final_total    │   │  unit_price     │       │
//! │  │  discount_bps   │   │  total_saving   │   │  line_total     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ RequestContext  │   │  OrderStatus    │   Cart / CartItem live in   │
//! │  │  customer_id    │   │  Placed         │   the `cart` module         │
//! │  │  actor          │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartItem;
use crate::money::{Money, Percentage};
use crate::pricing::PurchaseSummary;

// =============================================================================
// Request Context
// =============================================================================

/// Who is acting and on whose cart.
///
/// Every cart operation receives one of these instead of reading a
/// process-wide customer id or audit name. `actor` is written into the
/// `created_by` / `updated_by` audit fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub customer_id: String,
    pub actor: String,
}

impl RequestContext {
    /// Creates a context for `customer_id` acting as `actor`.
    pub fn new(customer_id: impl Into<String>, actor: impl Into<String>) -> Self {
        RequestContext {
            customer_id: customer_id.into(),
            actor: actor.into(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the catalog and snapshotted into carts.
    pub name: String,

    pub description: Option<String>,

    /// Catalog category used for browsing.
    pub category: String,

    /// Price in hundredths of the currency unit.
    pub price_cents: i64,

    /// Product discount in basis points (1000 = 10%).
    pub discount_bps: u32,

    /// Whether product is listed (soft delete).
    pub is_active: bool,

    /// Units on hand. Checked (not reserved) when adding to a cart.
    pub stock_quantity: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl Product {
    /// Returns the list price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the product discount rate.
    #[inline]
    pub fn discount(&self) -> Percentage {
        Percentage::from_bps(self.discount_bps)
    }

    /// Price after the product discount: `price − price × discount / 100`.
    ///
    /// ```rust
    /// # use shop_core::Product;
    /// # use chrono::Utc;
    /// let product = Product {
    ///     id: "p-1".into(),
    ///     name: "Office Chair".into(),
    ///     description: None,
    ///     category: "Furniture".into(),
    ///     price_cents: 300_000,
    ///     discount_bps: 1000,
    ///     is_active: true,
    ///     stock_quantity: 4,
    ///     created_at: Utc::now(),
    ///     created_by: "seed".into(),
    ///     updated_at: None,
    ///     updated_by: None,
    /// };
    /// assert_eq!(product.discounted_price().cents(), 270_000);
    /// ```
    pub fn discounted_price(&self) -> Money {
        self.price().apply_percentage_discount(self.discount())
    }

    /// Checks if at least one unit is on hand.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a placed order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order recorded and cart emptied.
    #[default]
    Placed,
}

// =============================================================================
// Order
// =============================================================================

/// A placed order: the purchase summary frozen at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    #[ts(as = "String")]
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub original_total_cents: i64,
    pub subtotal_cents: i64,
    pub cart_discount_bps: u32,
    pub cart_discount_cents: i64,
    pub final_total_cents: i64,
    pub total_saving_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub created_by: String,

    /// Loaded separately from `order_items`.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Freezes a purchase summary into an order for `ctx.customer_id`.
    ///
    /// Every line item of the summary becomes an [`OrderItem`] carrying the
    /// same price snapshot and its computed line total.
    pub fn from_summary(ctx: &RequestContext, summary: &PurchaseSummary, now: DateTime<Utc>) -> Self {
        let id = Uuid::new_v4().to_string();

        let items = summary
            .items
            .iter()
            .map(|item| OrderItem::from_cart_item(&id, item, &ctx.actor, now))
            .collect();

        Order {
            id,
            customer_id: ctx.customer_id.clone(),
            order_date: now,
            status: OrderStatus::Placed,
            original_total_cents: summary.original_total.cents(),
            subtotal_cents: summary.sub_total.cents(),
            cart_discount_bps: summary.cart_discount_percentage.bps(),
            cart_discount_cents: summary.discount_amount.cents(),
            final_total_cents: summary.final_total.cents(),
            total_saving_cents: summary.total_saving.cents(),
            created_at: now,
            created_by: ctx.actor.clone(),
            items,
        }
    }

    /// Returns the amount charged as Money.
    #[inline]
    pub fn final_total(&self) -> Money {
        Money::from_cents(self.final_total_cents)
    }

    /// Returns the total saving as Money.
    #[inline]
    pub fn total_saving(&self) -> Money {
        Money::from_cents(self.total_saving_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line of a placed order. Uses the same snapshot pattern as cart items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub product_name: String,
    pub original_price_cents: i64,
    pub discount_bps: u32,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl OrderItem {
    fn from_cart_item(order_id: &str, item: &CartItem, actor: &str, now: DateTime<Utc>) -> Self {
        OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            product_id: item.product_id.clone(),
            product_name: item.product_name.clone(),
            original_price_cents: item.original_price_cents,
            discount_bps: item.discount_bps,
            unit_price_cents: item.unit_price_cents,
            quantity: item.quantity,
            line_total_cents: item.line_total().cents(),
            created_at: now,
            created_by: actor.to_string(),
        }
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}
