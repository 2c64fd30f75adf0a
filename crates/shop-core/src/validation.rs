//! # Validation Module
//!
//! Input validation for catalog data and discount settings.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Configuration load   → validate_discount_settings                      │
//! │  Seeding / admin      → validate_product (name, category, price, ...)   │
//! │  CLI input            → validate_uuid, validate_category                │
//! │  Database             → NOT NULL / UNIQUE / CHECK / FK constraints      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart quantities are deliberately not validated here: a quantity below 1
//! means "remove the line" and there is no upper stock bound on updates.

use crate::error::ValidationError;
use crate::money::{Money, Percentage};
use crate::pricing::DiscountSettings;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_CATEGORY_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 2000;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use shop_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Office Chair").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates a catalog category name.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_text("category", category, MAX_CATEGORY_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents. Zero is allowed (free items).
///
/// ```rust
/// use shop_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(300_000).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount rate: 0% to 100%.
pub fn validate_discount_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > Percentage::HUNDRED.bps() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a stock level. Zero means out of stock.
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock_quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every field of a product before it is written to the catalog.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_uuid(&product.id)?;
    validate_product_name(&product.name)?;
    validate_category(&product.category)?;
    if let Some(description) = &product.description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: MAX_DESCRIPTION_LEN,
            });
        }
    }
    validate_price_cents(product.price_cents)?;
    validate_discount_bps("discount", product.discount_bps)?;
    validate_stock_quantity(product.stock_quantity)?;

    Ok(())
}

/// Validates cart discount settings.
///
/// ## Rules
/// - Minimum amount must be non-negative (zero makes every non-empty cart
///   eligible)
/// - Percentage must be within 0..=100
pub fn validate_discount_settings(settings: &DiscountSettings) -> ValidationResult<()> {
    if settings.minimum_amount_for_discount < Money::zero() {
        return Err(ValidationError::OutOfRange {
            field: "DiscountSettings:MinimumCartAmountForDiscount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    validate_discount_bps(
        "DiscountSettings:DiscountPercentage",
        settings.cart_discount_percentage.bps(),
    )
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string (product ids, cart item ids).
///
/// ```rust
/// use shop_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim())
        .map_err(|_| ValidationError::invalid_format("id", "must be a valid UUID"))?;

    Ok(())
}
