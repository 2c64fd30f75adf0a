//! # Cart Pricing Engine
//!
//! Turns a cart into a [`PurchaseSummary`].
//!
//! ## Two Discounts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. PRODUCT DISCOUNT  (per item, frozen at add-time)                    │
//! │     Office Chair 3000.00 at 10% off → unit_price 2700.00                │
//! │                                                                         │
//! │  2. CART DISCOUNT  (whole cart, computed on every read)                 │
//! │     sub_total = Σ unit_price × qty                                      │
//! │     sub_total >= minimum (inclusive)?                                   │
//! │        yes → discount_amount = round(sub_total × pct / 100, 2)          │
//! │        no  → discount_amount = 0, tell the customer the shortfall       │
//! │                                                                         │
//! │  Example: 2 × Office Chair                                              │
//! │     original_total            6000.00                                   │
//! │     sub_total                 5400.00   (product saving  600.00)        │
//! │     cart discount 10%        - 540.00   (5400 >= 5000 ✓)                │
//! │     final_total               4860.00   (total saving   1140.00)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`compute_summary`] has no I/O, no clock and no shared state, so it can be
//! called concurrently from any thread.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartItem};
use crate::money::{Money, Percentage};

// =============================================================================
// Discount Settings
// =============================================================================

/// Cart-level discount configuration, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountSettings {
    /// Sub-total at or above which the cart discount applies.
    pub minimum_amount_for_discount: Money,

    /// Percentage taken off the sub-total when it applies.
    pub cart_discount_percentage: Percentage,
}

impl Default for DiscountSettings {
    /// 10% off carts of 5000.00 or more.
    fn default() -> Self {
        DiscountSettings {
            minimum_amount_for_discount: Money::from_units(5000),
            cart_discount_percentage: Percentage::from_percent(10),
        }
    }
}

// =============================================================================
// Purchase Summary
// =============================================================================

/// All totals and discount outcomes for a cart at one point in time.
///
/// Built fresh by [`compute_summary`] on every request; never persisted and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseSummary {
    pub items: Vec<CartItem>,
    pub sub_total: Money,
    pub original_total: Money,
    pub product_discount_saving: Money,
    pub cart_discount_percentage: Percentage,
    pub discount_amount: Money,
    pub final_total: Money,
    pub total_saving: Money,
    pub cart_discount_applied: bool,
    pub minimum_amount_for_discount: Money,
}

impl PurchaseSummary {
    /// The summary of an empty (or missing) cart. Only the threshold is
    /// populated, for display.
    pub fn empty(settings: &DiscountSettings) -> Self {
        PurchaseSummary {
            items: Vec::new(),
            sub_total: Money::zero(),
            original_total: Money::zero(),
            product_discount_saving: Money::zero(),
            cart_discount_percentage: Percentage::zero(),
            discount_amount: Money::zero(),
            final_total: Money::zero(),
            total_saving: Money::zero(),
            cart_discount_applied: false,
            minimum_amount_for_discount: settings.minimum_amount_for_discount,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// What the customer should be told about the cart discount.
    pub fn discount_notice(&self) -> DiscountNotice {
        if self.is_empty() {
            DiscountNotice::None
        } else if self.cart_discount_applied {
            DiscountNotice::Applied {
                percentage: self.cart_discount_percentage,
            }
        } else {
            DiscountNotice::Unlock {
                shortfall: self.minimum_amount_for_discount - self.sub_total,
                percentage: self.cart_discount_percentage,
            }
        }
    }
}

/// Structured discount message, rendered by [`crate::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountNotice {
    /// Empty cart: nothing to say.
    None,
    /// The cart discount is applied.
    Applied { percentage: Percentage },
    /// Spending `shortfall` more unlocks the discount.
    Unlock { shortfall: Money, percentage: Percentage },
}

// =============================================================================
// Engine
// =============================================================================

/// Computes the purchase summary of `cart`.
///
/// ## Algorithm
/// 1. No cart or no items → [`PurchaseSummary::empty`]
/// 2. `sub_total = Σ line_total` (product discount already in unit prices)
/// 3. `original_total = Σ original_line_total`
/// 4. `product_discount_saving = original_total − sub_total`
/// 5. `cart_discount_applied = sub_total >= minimum` (inclusive)
/// 6. `discount_amount = sub_total × pct / 100`, half-to-even to 2 places, or 0
/// 7. `final_total = sub_total − discount_amount`
/// 8. `total_saving = product_discount_saving + discount_amount`
///
/// Total over any well-formed cart: there is no failure case.
pub fn compute_summary(cart: Option<&Cart>, settings: &DiscountSettings) -> PurchaseSummary {
    let items = match cart {
        Some(cart) if !cart.is_empty() => &cart.items,
        _ => return PurchaseSummary::empty(settings),
    };

    let sub_total: Money = items.iter().map(CartItem::line_total).sum();
    let original_total: Money = items.iter().map(CartItem::original_line_total).sum();
    let product_discount_saving = original_total - sub_total;

    let cart_discount_applied = sub_total >= settings.minimum_amount_for_discount;
    let discount_amount = if cart_discount_applied {
        sub_total.percentage_of(settings.cart_discount_percentage)
    } else {
        Money::zero()
    };

    PurchaseSummary {
        items: items.clone(),
        sub_total,
        original_total,
        product_discount_saving,
        cart_discount_percentage: settings.cart_discount_percentage,
        discount_amount,
        final_total: sub_total - discount_amount,
        total_saving: product_discount_saving + discount_amount,
        cart_discount_applied,
        minimum_amount_for_discount: settings.minimum_amount_for_discount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::product;
    use crate::types::RequestContext;
    use chrono::Utc;

    fn cart_with(lines: &[(i64, u32, u32)]) -> Cart {
        let ctx = RequestContext::new("customer-1", "tester");
        let mut cart = Cart::new(&ctx, Utc::now());
        for (index, (price_cents, discount_bps, quantity)) in lines.iter().enumerate() {
            let p = product(&format!("p{}", index), *price_cents, *discount_bps);
            for _ in 0..*quantity {
                cart.add_product(&p, &ctx.actor, Utc::now()).unwrap();
            }
        }
        cart
    }

    #[test]
    fn test_empty_cart_summary() {
        let settings = DiscountSettings::default();

        for summary in [
            compute_summary(None, &settings),
            compute_summary(Some(&cart_with(&[])), &settings),
        ] {
            assert!(summary.items.is_empty());
            assert!(!summary.cart_discount_applied);
            assert_eq!(summary.sub_total, Money::zero());
            assert_eq!(summary.original_total, Money::zero());
            assert_eq!(summary.discount_amount, Money::zero());
            assert_eq!(summary.final_total, Money::zero());
            assert_eq!(summary.total_saving, Money::zero());
            assert_eq!(summary.minimum_amount_for_discount, Money::from_units(5000));
            assert_eq!(summary.discount_notice(), DiscountNotice::None);
        }
    }

    #[test]
    fn test_single_item_below_threshold() {
        let summary = compute_summary(Some(&cart_with(&[(100_000, 0, 1)])), &DiscountSettings::default());

        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].unit_price_cents, 100_000);
        assert_eq!(summary.sub_total.cents(), 100_000);
        assert_eq!(summary.discount_amount, Money::zero());
        assert_eq!(summary.final_total.cents(), 100_000);
        assert!(!summary.cart_discount_applied);
        assert_eq!(
            summary.discount_notice(),
            DiscountNotice::Unlock {
                shortfall: Money::from_units(4000),
                percentage: Percentage::from_percent(10),
            }
        );
    }

    #[test]
    fn test_product_and_cart_discount_combine() {
        let summary = compute_summary(Some(&cart_with(&[(300_000, 1000, 2)])), &DiscountSettings::default());

        assert_eq!(summary.items[0].quantity, 2);
        assert_eq!(summary.sub_total.cents(), 540_000);
        assert!(summary.cart_discount_applied);
        assert_eq!(summary.discount_amount.cents(), 54_000);
        assert_eq!(summary.final_total.cents(), 486_000);
        assert_eq!(summary.original_total.cents(), 600_000);
        assert_eq!(summary.product_discount_saving.cents(), 60_000);
        assert_eq!(summary.total_saving.cents(), 114_000);
        assert_eq!(
            summary.discount_notice(),
            DiscountNotice::Applied {
                percentage: Percentage::from_percent(10)
            }
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let settings = DiscountSettings::default();

        let at = compute_summary(Some(&cart_with(&[(500_000, 0, 1)])), &settings);
        assert!(at.cart_discount_applied);
        assert_eq!(at.discount_amount.cents(), 50_000);

        let below = compute_summary(Some(&cart_with(&[(499_999, 0, 1)])), &settings);
        assert!(!below.cart_discount_applied);
        assert_eq!(below.discount_amount, Money::zero());
        assert_eq!(
            below.discount_notice(),
            DiscountNotice::Unlock {
                shortfall: Money::from_cents(1),
                percentage: Percentage::from_percent(10),
            }
        );
    }

    #[test]
    fn test_cart_discount_rounds_half_to_even() {
        let settings = DiscountSettings {
            minimum_amount_for_discount: Money::zero(),
            cart_discount_percentage: Percentage::from_percent(10),
        };

        // 0.25 × 10% = 0.025 → 0.02
        let summary = compute_summary(Some(&cart_with(&[(25, 0, 1)])), &settings);
        assert_eq!(summary.discount_amount.cents(), 2);
        assert_eq!(summary.final_total.cents(), 23);

        // 0.35 × 10% = 0.035 → 0.04
        let summary = compute_summary(Some(&cart_with(&[(35, 0, 1)])), &settings);
        assert_eq!(summary.discount_amount.cents(), 4);
    }

    #[test]
    fn test_summary_is_deterministic() {
        let cart = cart_with(&[(300_000, 1000, 2), (12_345, 1250, 3)]);
        let settings = DiscountSettings::default();

        assert_eq!(compute_summary(Some(&cart), &settings), compute_summary(Some(&cart), &settings));
    }

    #[test]
    fn test_totals_ordering_and_saving_identity() {
        let percentages = [0, 1, 1250, 5000, 10_000];
        let prices = [0, 1, 99, 12_345, 300_000, 1_000_000];

        for &cart_pct in &percentages {
            for &minimum in &[0, 100_000, 500_000] {
                let settings = DiscountSettings {
                    minimum_amount_for_discount: Money::from_cents(minimum),
                    cart_discount_percentage: Percentage::from_bps(cart_pct),
                };
                for &price in &prices {
                    for &product_pct in &percentages {
                        let cart = cart_with(&[(price, product_pct, 3), (price + 7, 333, 1)]);
                        let s = compute_summary(Some(&cart), &settings);

                        assert!(s.original_total >= s.sub_total);
                        assert!(s.sub_total >= s.final_total);
                        assert!(s.final_total >= Money::zero());
                        assert_eq!(s.total_saving, s.product_discount_saving + s.discount_amount);
                        assert_eq!(s.cart_discount_applied, s.sub_total >= settings.minimum_amount_for_discount);
                        if s.cart_discount_applied {
                            assert_eq!(s.discount_amount, s.sub_total.percentage_of(settings.cart_discount_percentage));
                        } else {
                            assert_eq!(s.discount_amount, Money::zero());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_largest_line_quantity_keeps_totals_ordered() {
        let settings = DiscountSettings::default();

        for price in [300_000, i64::MAX / 4] {
            let mut cart = cart_with(&[(price, 1250, 1), (price, 0, 1)]);
            let ids: Vec<String> = cart.items.iter().map(|i| i.id.clone()).collect();
            for id in &ids {
                cart.update_quantity(id, crate::cart::MAX_LINE_QUANTITY, "tester", Utc::now())
                    .unwrap();
            }

            let s = compute_summary(Some(&cart), &settings);

            assert!(s.original_total >= s.sub_total);
            assert!(s.sub_total >= s.final_total);
            assert!(s.final_total >= Money::zero());
            assert!(s.cart_discount_applied);
            assert_eq!(s.total_saving, s.product_discount_saving + s.discount_amount);
        }

        // 2,147,483,647 × (2625.00 + 3000.00) fits without saturating
        let mut cart = cart_with(&[(300_000, 1250, 1), (300_000, 0, 1)]);
        let ids: Vec<String> = cart.items.iter().map(|i| i.id.clone()).collect();
        for id in &ids {
            cart.update_quantity(id, crate::cart::MAX_LINE_QUANTITY, "tester", Utc::now())
                .unwrap();
        }
        let s = compute_summary(Some(&cart), &DiscountSettings::default());
        assert_eq!(s.sub_total.cents(), 562_500 * crate::cart::MAX_LINE_QUANTITY);
        assert_eq!(s.original_total.cents(), 600_000 * crate::cart::MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_notice_serializes_with_kind_tag() {
        let notice = DiscountNotice::Unlock {
            shortfall: Money::from_units(4000),
            percentage: Percentage::from_percent(10),
        };
        let json = serde_json::to_value(notice).unwrap();

        assert_eq!(json["kind"], "unlock");
        assert_eq!(json["shortfall"], 400_000);
        assert_eq!(json["percentage"], 1000);
    }
}
