//! # Cart Aggregate
//!
//! The per-customer cart and its line items, with the rules every mutation
//! must respect.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutations                                       │
//! │                                                                         │
//! │  Caller Intent            Cart Method              State Change         │
//! │  ─────────────            ───────────              ────────────         │
//! │                                                                         │
//! │  Add product ────────────► add_product() ────────► qty += 1 or push     │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ────► qty = n (n < 1 drops)│
//! │                                                                         │
//! │  Remove line ────────────► remove_item() ────────► items.remove(i)      │
//! │                                                                         │
//! │  Empty cart ─────────────► clear() ──────────────► items.clear()        │
//! │                                                                         │
//! │  Every mutation stamps updated_at / updated_by on the cart.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! `NONE → EXISTS(empty) → EXISTS(non-empty) ⇄ EXISTS(empty)`. A cart is
//! never deleted; clearing only removes its items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Percentage};
use crate::types::{Product, RequestContext};

/// Largest quantity a single line may hold.
pub const MAX_LINE_QUANTITY: i64 = i32::MAX as i64;

fn quantity_out_of_range() -> CoreError {
    CoreError::Validation(ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: MAX_LINE_QUANTITY,
    })
}

// =============================================================================
// Cart Item
// =============================================================================

/// One product's presence in a cart.
///
/// ## Price Freezing
/// `product_name`, `original_price_cents`, `discount_bps` and
/// `unit_price_cents` are copied from the product when the line is created
/// and never refreshed afterwards, even when the same product is added
/// again at a new price. Only `quantity` changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CartItem {
    pub id: String,
    pub cart_id: String,
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub product_name: String,

    /// List price at time of adding (frozen).
    pub original_price_cents: i64,

    /// Product discount at time of adding (frozen).
    pub discount_bps: u32,

    /// Discounted price charged per unit (frozen).
    pub unit_price_cents: i64,

    /// Always >= 1; a line at zero is removed instead.
    pub quantity: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl CartItem {
    /// Snapshots `product` into a new line with quantity 1.
    pub fn from_product(cart_id: &str, product: &Product, actor: &str, now: DateTime<Utc>) -> Self {
        CartItem {
            id: Uuid::new_v4().to_string(),
            cart_id: cart_id.to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            original_price_cents: product.price_cents,
            discount_bps: product.discount_bps,
            unit_price_cents: product.discounted_price().cents(),
            quantity: 1,
            created_at: now,
            created_by: actor.to_string(),
            updated_at: None,
            updated_by: None,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn original_price(&self) -> Money {
        Money::from_cents(self.original_price_cents)
    }

    #[inline]
    pub fn discount(&self) -> Percentage {
        Percentage::from_bps(self.discount_bps)
    }

    /// `unit_price × quantity`
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// `original_price × quantity`
    pub fn original_line_total(&self) -> Money {
        self.original_price().multiply_quantity(self.quantity)
    }

    /// What the product discount saves on this line.
    pub fn line_saving(&self) -> Money {
        self.original_line_total() - self.line_total()
    }

    fn touch(&mut self, actor: &str, now: DateTime<Utc>) {
        self.updated_at = Some(now);
        self.updated_by = Some(actor.to_string());
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A customer's cart.
///
/// ## Invariants
/// - One cart per customer
/// - Items are unique by `product_id` (adding the same product increases quantity)
/// - Every item has quantity >= 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Cart {
    pub id: String,
    pub customer_id: String,

    /// Loaded separately from `cart_items`.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<CartItem>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl Cart {
    /// Creates an empty cart for the context's customer.
    pub fn new(ctx: &RequestContext, now: DateTime<Utc>) -> Self {
        Cart {
            id: Uuid::new_v4().to_string(),
            customer_id: ctx.customer_id.clone(),
            items: Vec::new(),
            created_at: now,
            created_by: ctx.actor.clone(),
            updated_at: None,
            updated_by: None,
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Inactive product: `ProductNotFound`
    /// - No stock: `OutOfStock`, cart untouched
    /// - Product already in cart: quantity + 1, snapshot untouched
    /// - Line already at [`MAX_LINE_QUANTITY`]: `Validation`, cart untouched
    /// - Otherwise: new line snapshotting the current price and discount
    ///
    /// Returns the affected line.
    pub fn add_product(&mut self, product: &Product, actor: &str, now: DateTime<Utc>) -> CoreResult<&CartItem> {
        if !product.is_active {
            return Err(CoreError::ProductNotFound(product.id.clone()));
        }
        if !product.is_in_stock() {
            return Err(CoreError::OutOfStock {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
            });
        }

        let index = match self.items.iter().position(|i| i.product_id == product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                if item.quantity >= MAX_LINE_QUANTITY {
                    return Err(quantity_out_of_range());
                }
                item.quantity += 1;
                item.touch(actor, now);
                index
            }
            None => {
                self.items.push(CartItem::from_product(&self.id, product, actor, now));
                self.items.len() - 1
            }
        };

        self.touch(actor, now);
        Ok(&self.items[index])
    }

    /// Removes the line `cart_item_id`.
    pub fn remove_item(&mut self, cart_item_id: &str, actor: &str, now: DateTime<Utc>) -> CoreResult<CartItem> {
        let index = self.position_of(cart_item_id)?;
        let removed = self.items.remove(index);
        self.touch(actor, now);
        Ok(removed)
    }

    /// Sets the quantity of line `cart_item_id`.
    ///
    /// A quantity below 1 removes the line rather than failing. Stock is not
    /// checked; a quantity above [`MAX_LINE_QUANTITY`] is a `Validation`
    /// error and leaves the cart untouched.
    pub fn update_quantity(
        &mut self,
        cart_item_id: &str,
        quantity: i64,
        actor: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        let index = self.position_of(cart_item_id)?;
        if quantity > MAX_LINE_QUANTITY {
            return Err(quantity_out_of_range());
        }

        if quantity < 1 {
            self.items.remove(index);
        } else {
            let item = &mut self.items[index];
            item.quantity = quantity;
            item.touch(actor, now);
        }

        self.touch(actor, now);
        Ok(())
    }

    /// Removes every line. Returns how many lines were dropped.
    pub fn clear(&mut self, actor: &str, now: DateTime<Utc>) -> usize {
        let removed = self.items.len();
        self.items.clear();
        self.touch(actor, now);
        removed
    }

    /// Looks up a line by id.
    pub fn find_item(&self, cart_item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == cart_item_id)
    }

    /// Sum of quantities across all lines (the cart badge count).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position_of(&self, cart_item_id: &str) -> CoreResult<usize> {
        self.items
            .iter()
            .position(|i| i.id == cart_item_id)
            .ok_or_else(|| CoreError::CartItemNotFound {
                cart_item_id: cart_item_id.to_string(),
            })
    }

    fn touch(&mut self, actor: &str, now: DateTime<Utc>) {
        self.updated_at = Some(now);
        self.updated_by = Some(actor.to_string());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
