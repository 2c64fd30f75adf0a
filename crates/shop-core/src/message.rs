//! Customer-facing text for discount notices and order confirmations.
//!
//! The pricing engine only produces structured values; this module turns
//! them into the exact strings shown to customers:
//!
//! ```text
//! Applied { 10% }              → "🎉 10% cart discount applied!"
//! Unlock  { 4000.00, 10% }     → "Add ₹4,000.00 more to unlock 10% cart discount!"
//! None                         → ""
//! Order placed, saving 1140.00 → "Order placed successfully! You saved ₹1,140.00"
//! ```

use crate::money::Money;
use crate::pricing::DiscountNotice;

/// Default currency symbol for rendered amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Renders an amount with the currency symbol and thousands separators.
pub fn format_amount(amount: Money, currency_symbol: &str) -> String {
    if amount.is_negative() {
        format!("-{}{}", currency_symbol, (Money::zero() - amount).to_grouped_string())
    } else {
        format!("{}{}", currency_symbol, amount.to_grouped_string())
    }
}

/// Renders a discount notice. [`DiscountNotice::None`] renders as an empty
/// string.
pub fn render_discount_message(notice: &DiscountNotice, currency_symbol: &str) -> String {
    match notice {
        DiscountNotice::None => String::new(),
        DiscountNotice::Applied { percentage } => {
            format!("🎉 {}% cart discount applied!", percentage)
        }
        DiscountNotice::Unlock { shortfall, percentage } => format!(
            "Add {} more to unlock {}% cart discount!",
            format_amount(*shortfall, currency_symbol),
            percentage
        ),
    }
}

/// Renders the message shown after a successful checkout.
pub fn render_order_confirmation(total_saving: Money, currency_symbol: &str) -> String {
    format!(
        "Order placed successfully! You saved {}",
        format_amount(total_saving, currency_symbol)
    )
}
