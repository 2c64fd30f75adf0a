//! Terminal tables for the storefront CLI.
//!
//! Every function returns a `String` so output can be tested without a
//! terminal.

use shop_core::message::{format_amount, render_discount_message, render_order_confirmation};
use shop_core::{Money, Product, PurchaseSummary};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
};

use crate::service::OrderConfirmation;

/// Product listing: id, name, category, price, discount, discounted price
/// and stock.
pub fn products_table(products: &[Product], currency_symbol: &str) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Name", "Category", "Price", "Discount", "You Pay", "Stock"]);

    for product in products {
        builder.push_record([
            product.id.clone(),
            product.name.clone(),
            product.category.clone(),
            format_amount(product.price(), currency_symbol),
            format!("{}%", product.discount()),
            format_amount(product.discounted_price(), currency_symbol),
            stock_label(product.stock_quantity),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..7), Alignment::right());
    table.to_string()
}

fn stock_label(stock: i64) -> String {
    if stock > 0 {
        stock.to_string()
    } else {
        "out of stock".to_string()
    }
}

/// Category listing, one per line.
pub fn categories_list(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }
    categories.join("\n")
}

/// Cart lines followed by the totals block and the discount message.
pub fn cart_summary(summary: &PurchaseSummary, currency_symbol: &str) -> String {
    if summary.is_empty() {
        return format!(
            "Your cart is empty. Spend {} to unlock the cart discount.",
            format_amount(summary.minimum_amount_for_discount, currency_symbol)
        );
    }

    let mut builder = Builder::default();
    builder.push_record(["Item", "Product", "Unit Price", "Qty", "Line Total"]);
    for item in &summary.items {
        builder.push_record([
            item.id.clone(),
            item.product_name.clone(),
            format_amount(item.unit_price(), currency_symbol),
            item.quantity.to_string(),
            format_amount(item.line_total(), currency_symbol),
        ]);
    }

    let mut lines = builder.build();
    lines.with(Style::modern_rounded());
    lines.modify(Columns::new(2..5), Alignment::right());

    let cart_discount_label = format!("Cart discount ({}%)", summary.cart_discount_percentage);
    let mut totals = Builder::default();
    for (label, value) in [
        ("Original total", format_amount(summary.original_total, currency_symbol)),
        ("Product discounts", saving(summary.product_discount_saving, currency_symbol)),
        ("Subtotal", format_amount(summary.sub_total, currency_symbol)),
        (cart_discount_label.as_str(), saving(summary.discount_amount, currency_symbol)),
        ("Total", format_amount(summary.final_total, currency_symbol)),
        ("You save", format_amount(summary.total_saving, currency_symbol)),
    ] {
        totals.push_record([label.to_string(), value]);
    }

    let mut totals = totals.build();
    totals.with(Style::modern_rounded());
    totals.modify(Columns::new(1..2), Alignment::right());

    let mut out = format!("{lines}\n{totals}");
    let message = render_discount_message(&summary.discount_notice(), currency_symbol);
    if !message.is_empty() {
        out.push('\n');
        out.push_str(&message);
    }
    out
}

fn saving(value: Money, currency_symbol: &str) -> String {
    if value.is_zero() {
        format_amount(value, currency_symbol)
    } else {
        format!("-{}", format_amount(value, currency_symbol))
    }
}

/// Order id, total paid and the confirmation message.
pub fn order_confirmation(confirmation: &OrderConfirmation, currency_symbol: &str) -> String {
    format!(
        "Order {}\nTotal paid: {}\n{}",
        confirmation.order.id,
        format_amount(confirmation.summary.final_total, currency_symbol),
        render_order_confirmation(confirmation.summary.total_saving, currency_symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shop_core::{compute_summary, Cart, DiscountSettings, RequestContext};

    fn chair(stock: i64) -> Product {
        Product {
            id: "p-chair".to_string(),
            name: "Office Chair".to_string(),
            description: None,
            category: "Furniture".to_string(),
            price_cents: 300_000,
            discount_bps: 1000,
            is_active: true,
            stock_quantity: stock,
            created_at: Utc::now(),
            created_by: "test".to_string(),
            updated_at: None,
            updated_by: None,
        }
    }

    fn summary_with_chairs(qty: usize) -> PurchaseSummary {
        let ctx = RequestContext::new("alice", "test");
        let mut cart = Cart::new(&ctx, Utc::now());
        for _ in 0..qty {
            cart.add_product(&chair(10), "test", Utc::now()).unwrap();
        }
        compute_summary(Some(&cart), &DiscountSettings::default())
    }

    #[test]
    fn test_products_table() {
        let out = products_table(&[chair(0)], "₹");

        assert!(out.contains("Office Chair"));
        assert!(out.contains("₹3,000.00"));
        assert!(out.contains("₹2,700.00"));
        assert!(out.contains("10%"));
        assert!(out.contains("out of stock"));
        assert_eq!(products_table(&[], "₹"), "No products found.");
    }

    #[test]
    fn test_cart_summary_with_discount() {
        let out = cart_summary(&summary_with_chairs(2), "₹");

        assert!(out.contains("₹5,400.00"));
        assert!(out.contains("-₹540.00"));
        assert!(out.contains("₹4,860.00"));
        assert!(out.contains("₹1,140.00"));
        assert!(out.ends_with("🎉 10% cart discount applied!"));
    }

    #[test]
    fn test_cart_summary_below_threshold() {
        let out = cart_summary(&summary_with_chairs(1), "₹");

        assert!(out.ends_with("Add ₹2,300.00 more to unlock 10% cart discount!"));
    }

    #[test]
    fn test_empty_cart() {
        let summary = PurchaseSummary::empty(&DiscountSettings::default());
        let out = cart_summary(&summary, "$");

        assert_eq!(out, "Your cart is empty. Spend $5,000.00 to unlock the cart discount.");
    }

    #[test]
    fn test_categories_list() {
        assert_eq!(categories_list(&["A".to_string(), "B".to_string()]), "A\nB");
        assert_eq!(categories_list(&[]), "No categories found.");
    }
}
