//! # Storefront Configuration
//!
//! Loaded once at startup from defaults overridden by environment variables,
//! then shared read-only.
//!
//! ## Recognized Variables
//! ```text
//! ┌──────────────────────────────────────────────────┬──────────────────┐
//! │ Variable                                         │ Default          │
//! ├──────────────────────────────────────────────────┼──────────────────┤
//! │ DiscountSettings__MinimumCartAmountForDiscount   │ 5000             │
//! │ DiscountSettings__DiscountPercentage             │ 10               │
//! │ STOREFRONT_DB_PATH                               │ ./storefront.db  │
//! │ STOREFRONT_CURRENCY_SYMBOL                       │ ₹                │
//! │ STOREFRONT_ACTOR                                 │ storefront       │
//! └──────────────────────────────────────────────────┴──────────────────┘
//! ```
//!
//! The discount keys are `DiscountSettings:MinimumCartAmountForDiscount` and
//! `DiscountSettings:DiscountPercentage`; the environment spells the section
//! separator as `__`. Amounts and percentages are exact decimals (`4999.99`,
//! `12.5`).

use std::env;
use std::path::PathBuf;

use serde::Serialize;
use shop_core::message::DEFAULT_CURRENCY_SYMBOL;
use shop_core::validation::validate_discount_settings;
use shop_core::{DiscountSettings, Money, Percentage, ValidationError};
use thiserror::Error;

pub const MINIMUM_AMOUNT_KEY: &str = "DiscountSettings:MinimumCartAmountForDiscount";
pub const DISCOUNT_PERCENTAGE_KEY: &str = "DiscountSettings:DiscountPercentage";
pub const DB_PATH_VAR: &str = "STOREFRONT_DB_PATH";
pub const CURRENCY_SYMBOL_VAR: &str = "STOREFRONT_CURRENCY_SYMBOL";
pub const ACTOR_VAR: &str = "STOREFRONT_ACTOR";

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct StorefrontConfig {
    /// Cart discount threshold and rate.
    pub discount: DiscountSettings,

    /// SQLite database file.
    pub db_path: PathBuf,

    /// Prefix for rendered amounts.
    pub currency_symbol: String,

    /// Written into `created_by` / `updated_by` audit fields.
    pub actor: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            discount: DiscountSettings::default(),
            db_path: PathBuf::from("./storefront.db"),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            actor: "storefront".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps an environment
    /// variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = StorefrontConfig::default();

        if let Some(value) = lookup(&env_name(MINIMUM_AMOUNT_KEY)) {
            config.discount.minimum_amount_for_discount = value
                .parse::<Money>()
                .map_err(|e| ConfigError::invalid(MINIMUM_AMOUNT_KEY, e.to_string()))?;
        }

        if let Some(value) = lookup(&env_name(DISCOUNT_PERCENTAGE_KEY)) {
            config.discount.cart_discount_percentage = value
                .parse::<Percentage>()
                .map_err(|e| ConfigError::invalid(DISCOUNT_PERCENTAGE_KEY, e.to_string()))?;
        }

        validate_discount_settings(&config.discount).map_err(ConfigError::from)?;

        if let Some(path) = lookup(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(symbol) = lookup(CURRENCY_SYMBOL_VAR) {
            config.currency_symbol = symbol;
        }

        if let Some(actor) = lookup(ACTOR_VAR) {
            if actor.trim().is_empty() {
                return Err(ConfigError::invalid(ACTOR_VAR, "must not be empty"));
            }
            config.actor = actor.trim().to_string();
        }

        Ok(config)
    }
}

/// `Section:Key` → `Section__Key`.
fn env_name(key: &str) -> String {
    key.replace(':', "__")
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        let reason = err.to_string();
        match err {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => ConfigError::InvalidValue { key: field, reason },
        }
    }
}
