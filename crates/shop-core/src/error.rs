//! # Error Types
//!
//! Domain-specific error types for shop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shop-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shop-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  storefront errors (app)                                               │
//! │  ├── ServiceError     - CoreError | DbError, with an ErrorKind         │
//! │  └── ApiError         - What presentation sees (code + message)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the cart protocol.
///
/// Each variant is a distinct discriminant so callers can branch on the
/// kind of failure instead of parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product does not exist or is no longer active.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product has no stock left.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Add to cart"
    ///      │
    ///      ▼
    /// Lookup product: stock_quantity = 0
    ///      │
    ///      ▼
    /// OutOfStock { product_name: "Desk Lamp", .. }
    ///      │
    ///      ▼
    /// UI shows: "'Desk Lamp' is out of stock"
    /// ```
    #[error("'{product_name}' is out of stock")]
    OutOfStock {
        product_id: String,
        product_name: String,
    },

    /// Customer has no cart yet.
    #[error("Cart not found for customer {0}")]
    CartNotFound(String),

    /// The line item id does not belong to the customer's cart.
    #[error("Cart item not found: {cart_item_id}")]
    CartItemNotFound { cart_item_id: String },

    /// Tried to place an order with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, malformed decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
