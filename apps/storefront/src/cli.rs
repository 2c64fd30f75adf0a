//! # Command Line
//!
//! ```text
//! storefront [--db PATH] [--json] <command>
//!
//!   products [--category C]          list active products
//!   categories                       list categories
//!   add     <product-id>   --customer ID
//!   remove  <item-id>      --customer ID
//!   update  <item-id> <qty> --customer ID    (qty < 1 removes the line)
//!   clear                  --customer ID
//!   cart                   --customer ID     purchase summary
//!   count                  --customer ID     units in the cart
//!   order                  --customer ID     place the order
//! ```
//!
//! Commands return their output as a `String`; `main` prints it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use shop_core::message::render_discount_message;
use shop_core::{PurchaseSummary, RequestContext};
use shop_db::Database;
use thiserror::Error;

use crate::config::StorefrontConfig;
use crate::error::ApiError;
use crate::render;
use crate::service::{CartService, CatalogService};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart CLI", long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides STOREFRONT_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List active products
    Products {
        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },
    /// List product categories
    Categories,
    /// Add one unit of a product to the cart
    Add {
        product_id: String,
        #[command(flatten)]
        customer: CustomerArgs,
    },
    /// Remove a line from the cart
    Remove {
        item_id: String,
        #[command(flatten)]
        customer: CustomerArgs,
    },
    /// Set the quantity of a cart line
    Update {
        item_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        #[command(flatten)]
        customer: CustomerArgs,
    },
    /// Empty the cart
    Clear {
        #[command(flatten)]
        customer: CustomerArgs,
    },
    /// Show the purchase summary
    Cart {
        #[command(flatten)]
        customer: CustomerArgs,
    },
    /// Show how many units are in the cart
    Count {
        #[command(flatten)]
        customer: CustomerArgs,
    },
    /// Place an order for everything in the cart
    Order {
        #[command(flatten)]
        customer: CustomerArgs,
    },
}

#[derive(Debug, Args)]
struct CustomerArgs {
    /// Customer whose cart to use
    #[arg(long, env = "STOREFRONT_CUSTOMER")]
    customer: String,
}

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct CartView<'a> {
    #[serde(flatten)]
    summary: &'a PurchaseSummary,
    message: String,
}

impl Cli {
    /// Runs the command against `db` and returns what to print.
    pub async fn run(self, db: &Database, config: &StorefrontConfig) -> Result<String, CliError> {
        let carts = CartService::from_database(db.clone(), config.discount);
        let catalog = CatalogService::new(db);
        let symbol = config.currency_symbol.as_str();
        let ctx = |customer: CustomerArgs| RequestContext::new(customer.customer, config.actor.clone());

        let output = match self.command {
            Commands::Products { category } => {
                let products = catalog.list_products(category.as_deref()).await.map_err(ApiError::from)?;
                if self.json {
                    serde_json::to_string_pretty(&products)?
                } else {
                    render::products_table(&products, symbol)
                }
            }
            Commands::Categories => {
                let categories = catalog.categories().await.map_err(ApiError::from)?;
                if self.json {
                    serde_json::to_string_pretty(&categories)?
                } else {
                    render::categories_list(&categories)
                }
            }
            Commands::Add { product_id, customer } => {
                let item = carts.add_to_cart(&ctx(customer), &product_id).await.map_err(ApiError::from)?;
                if self.json {
                    serde_json::to_string_pretty(&item)?
                } else {
                    format!("Added {} (quantity {}) as item {}", item.product_name, item.quantity, item.id)
                }
            }
            Commands::Remove { item_id, customer } => {
                carts.remove_from_cart(&ctx(customer), &item_id).await.map_err(ApiError::from)?;
                acknowledge(self.json, "Item removed")?
            }
            Commands::Update {
                item_id,
                quantity,
                customer,
            } => {
                carts
                    .update_quantity(&ctx(customer), &item_id, quantity)
                    .await
                    .map_err(ApiError::from)?;
                acknowledge(self.json, "Cart updated")?
            }
            Commands::Clear { customer } => {
                carts.clear_cart(&ctx(customer)).await.map_err(ApiError::from)?;
                acknowledge(self.json, "Cart cleared")?
            }
            Commands::Cart { customer } => {
                let summary = carts.purchase_summary(&ctx(customer)).await.map_err(ApiError::from)?;
                if self.json {
                    let message = render_discount_message(&summary.discount_notice(), symbol);
                    serde_json::to_string_pretty(&CartView {
                        summary: &summary,
                        message,
                    })?
                } else {
                    render::cart_summary(&summary, symbol)
                }
            }
            Commands::Count { customer } => {
                let count = carts.cart_item_count(&ctx(customer)).await;
                if self.json {
                    serde_json::to_string_pretty(&json!({ "count": count }))?
                } else {
                    count.to_string()
                }
            }
            Commands::Order { customer } => {
                let confirmation = carts.place_order(&ctx(customer)).await.map_err(ApiError::from)?;
                if self.json {
                    serde_json::to_string_pretty(&confirmation)?
                } else {
                    render::order_confirmation(&confirmation, symbol)
                }
            }
        };

        Ok(output)
    }
}

fn acknowledge(json: bool, message: &str) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(&json!({ "ok": true, "message": message }))?)
    } else {
        Ok(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::Utc;
    use shop_core::Product;
    use shop_db::DbConfig;

    async fn database_with_chair() -> Database {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        db.products()
            .insert(&Product {
                id: "7f1c9a52-4a8e-4a39-9b1e-5d2f0c6e8a11".to_string(),
                name: "Office Chair".to_string(),
                description: None,
                category: "Furniture".to_string(),
                price_cents: 300_000,
                discount_bps: 1000,
                is_active: true,
                stock_quantity: 10,
                created_at: Utc::now(),
                created_by: "test".to_string(),
                updated_at: None,
                updated_by: None,
            })
            .await
            .unwrap();
        db
    }

    async fn run(db: &Database, args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("storefront").chain(args.iter().copied())).unwrap();
        cli.run(db, &StorefrontConfig::default()).await
    }

    #[test]
    fn test_parse_update_with_negative_quantity() {
        let cli = Cli::try_parse_from(["storefront", "update", "item-1", "-1", "--customer", "alice"]).unwrap();
        assert!(matches!(cli.command, Commands::Update { quantity: -1, .. }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["storefront", "products", "--json", "--db", "x.db"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
    }

    #[tokio::test]
    async fn test_add_then_cart() {
        let db = database_with_chair().await;
        let chair = "7f1c9a52-4a8e-4a39-9b1e-5d2f0c6e8a11";

        run(&db, &["add", chair, "--customer", "alice"]).await.unwrap();
        run(&db, &["add", chair, "--customer", "alice"]).await.unwrap();

        assert_eq!(run(&db, &["count", "--customer", "alice"]).await.unwrap(), "2");

        let out = run(&db, &["--json", "cart", "--customer", "alice"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["cart_discount_applied"], true);
        assert_eq!(value["message"], "🎉 10% cart discount applied!");
    }

    #[tokio::test]
    async fn test_errors_carry_kind() {
        let db = database_with_chair().await;

        let err = run(&db, &["order", "--customer", "bob"]).await.unwrap_err();
        match err {
            CliError::Api(api) => assert_eq!(api.code, ErrorKind::EmptyCart),
            other => panic!("unexpected error: {other}"),
        }
    }
}
