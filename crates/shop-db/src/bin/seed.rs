//! # Seed Data Generator
//!
//! Populates the database with a small demo catalog.
//!
//! ## Usage
//! ```bash
//! cargo run -p shop-db --bin seed
//!
//! # Specify database path (defaults to STOREFRONT_DB_PATH, then ./storefront.db)
//! cargo run -p shop-db --bin seed -- --db ./data/storefront.db
//! ```
//!
//! ## Generated Products
//! Each category mixes full-price and discounted products, and at least one
//! product is out of stock so the "out of stock" path can be tried by hand.

use chrono::Utc;
use shop_core::validation::validate_product;
use shop_core::Product;
use shop_db::{Database, DbConfig};
use std::env;
use uuid::Uuid;

/// (category, name, description, price in cents, discount bps, stock)
const CATALOG: &[(&str, &str, &str, i64, u32, i64)] = &[
    ("Furniture", "Office Chair", "Ergonomic mesh chair", 300_000, 1000, 25),
    ("Furniture", "Standing Desk", "Electric height-adjustable desk", 2_450_000, 1500, 8),
    ("Furniture", "Bookshelf", "Five-shelf oak bookshelf", 450_000, 0, 12),
    ("Electronics", "Wireless Mouse", "Bluetooth optical mouse", 89_900, 500, 140),
    ("Electronics", "Mechanical Keyboard", "Tenkeyless, brown switches", 649_900, 1000, 30),
    ("Electronics", "27\" Monitor", "QHD IPS panel", 1_899_900, 1250, 0),
    ("Lighting", "Desk Lamp", "LED lamp with dimmer", 150_000, 0, 40),
    ("Lighting", "Floor Lamp", "Arc floor lamp", 399_900, 2000, 6),
    ("Stationery", "Notebook", "A5 dotted, 120 pages", 24_900, 0, 500),
    ("Stationery", "Fountain Pen", "Steel nib, medium", 129_900, 750, 60),
];

const ACTOR: &str = "seed";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("STOREFRONT_DB_PATH").unwrap_or_else(|_| String::from("./storefront.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Storefront Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::open(DbConfig::file(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut generated = 0;
    for (category, name, description, price_cents, discount_bps, stock) in CATALOG {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            category: category.to_string(),
            price_cents: *price_cents,
            discount_bps: *discount_bps,
            is_active: true,
            stock_quantity: *stock,
            created_at: Utc::now(),
            created_by: ACTOR.to_string(),
            updated_at: None,
            updated_by: None,
        };

        if let Err(e) = validate_product(&product) {
            eprintln!("Skipping {}: {}", product.name, e);
            continue;
        }

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }

        println!("  {:<22} {:<12} {}", product.name, product.category, product.id);
        generated += 1;
    }

    println!();
    println!("✓ Generated {} products", generated);
    println!("  Categories: {}", db.products().categories().await?.join(", "));

    db.close().await;
    Ok(())
}
