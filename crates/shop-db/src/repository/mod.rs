//! # Repository Module
//!
//! ## Available Repositories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductRepository   catalog reads, inserts and updates                 │
//! │  CartRepository      cart + items, loaded and saved as one aggregate    │
//! │  OrderRepository     order placement (with cart emptying) and history   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository owns a clone of the pool; obtain them from
//! [`crate::Database`].

pub mod cart;
pub mod order;
pub mod product;
