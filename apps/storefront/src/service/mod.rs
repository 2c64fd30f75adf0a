//! # Services
//!
//! - [`CartService`] - the cart mutation protocol, purchase summary and
//!   checkout
//! - [`CatalogService`] - catalog browsing

pub mod cart;
pub mod catalog;

pub use cart::{CartService, OrderConfirmation};
pub use catalog::CatalogService;
