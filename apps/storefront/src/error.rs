//! # Service and API Errors
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CoreError (business rule)      DbError (storage fault)                 │
//! │        │                              │                                 │
//! │        └──────────────┬───────────────┘                                 │
//! │                       ▼                                                 │
//! │               ServiceError ── kind() ──► ErrorKind                      │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │  ApiError { code: ErrorKind, message }                                  │
//! │                                                                         │
//! │  Business errors keep their message ("'Desk Lamp' is out of stock").    │
//! │  Storage errors are logged with detail and shown as a generic message.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! { "code": "OUT_OF_STOCK", "message": "'Desk Lamp' is out of stock" }
//! ```

use serde::Serialize;
use shop_core::CoreError;
use shop_db::DbError;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Service Error
// =============================================================================

/// Failure of a cart or catalog operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule rejected the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failed underneath the operation.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] DbError),
}

impl ServiceError {
    /// The discriminant callers branch on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Core(CoreError::ProductNotFound(_)) => ErrorKind::ProductNotFound,
            ServiceError::Core(CoreError::OutOfStock { .. }) => ErrorKind::OutOfStock,
            ServiceError::Core(CoreError::CartNotFound(_)) => ErrorKind::CartNotFound,
            ServiceError::Core(CoreError::CartItemNotFound { .. }) => ErrorKind::CartItemNotFound,
            ServiceError::Core(CoreError::EmptyCart) => ErrorKind::EmptyCart,
            ServiceError::Core(CoreError::Validation(_)) => ErrorKind::Validation,
            ServiceError::Persistence(_) => ErrorKind::PersistenceFailure,
        }
    }
}

/// Error kinds exposed to presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ProductNotFound,
    OutOfStock,
    CartNotFound,
    CartItemNotFound,
    EmptyCart,
    Validation,
    PersistenceFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ProductNotFound => "PRODUCT_NOT_FOUND",
            ErrorKind::OutOfStock => "OUT_OF_STOCK",
            ErrorKind::CartNotFound => "CART_NOT_FOUND",
            ErrorKind::CartItemNotFound => "CART_ITEM_NOT_FOUND",
            ErrorKind::EmptyCart => "EMPTY_CART",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::PersistenceFailure => "PERSISTENCE_FAILURE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// API Error
// =============================================================================

/// What presentation receives when an operation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorKind,

    /// Human-readable error message for display
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

/// Storage detail is logged here and replaced by a generic message.
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let code = err.kind();
        match err {
            ServiceError::Core(core) => ApiError::new(code, core.to_string()),
            ServiceError::Persistence(db) => {
                tracing::error!(error = %db, "Storage failure surfaced to caller");
                let message = match db {
                    DbError::ConnectionFailed(_) | DbError::PoolExhausted => "Storage is unavailable. Please try again.",
                    _ => "Could not save your changes. Please try again.",
                };
                ApiError::new(code, message)
            }
        }
    }
}
