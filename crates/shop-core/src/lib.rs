//! # shop-core: Pure Business Logic for the Storefront
//!
//! This crate contains the cart pricing engine and the cart aggregate as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront (CartService, CLI)              │   │
//! │  │    add_to_cart, update_quantity, purchase_summary, place_order  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shop-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Summary  │  │   │
//! │  │   │   Order   │  │Percentage │  │ CartItem  │  │ Discounts │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shop-db (Database Layer)                     │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, RequestContext, etc.)
//! - [`money`] - Money and Percentage with integer arithmetic (no floating point!)
//! - [`cart`] - Cart aggregate and its mutation rules
//! - [`pricing`] - Purchase summary computation and discount settings
//! - [`message`] - Customer-facing discount and order messages
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shop_core::money::{Money, Percentage};
//!
//! let price = Money::from_cents(300_000); // 3000.00
//! let discounted = price.apply_percentage_discount(Percentage::from_bps(1000));
//! assert_eq!(discounted.cents(), 270_000); // 2700.00
//! ```

pub mod cart;
pub mod error;
pub mod message;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, MAX_LINE_QUANTITY};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percentage};
pub use pricing::{compute_summary, DiscountNotice, DiscountSettings, PurchaseSummary};
pub use types::*;
