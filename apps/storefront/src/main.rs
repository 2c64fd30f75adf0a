//! Storefront command line entry point.

use std::process::ExitCode;

use clap::Parser;
use shop_db::{Database, DbConfig};
use storefront::cli::Cli;
use storefront::{init_tracing, StorefrontConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let mut config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            return ExitCode::from(2);
        }
    };
    if let Some(path) = cli.db.clone() {
        config.db_path = path;
    }

    info!(
        db_path = %config.db_path.display(),
        minimum_amount = %config.discount.minimum_amount_for_discount,
        discount = %config.discount.cart_discount_percentage,
        "Starting storefront"
    );

    let db = match Database::open(DbConfig::file(config.db_path.clone())).await {
        Ok(db) => db,
        Err(err) => {
            error!(error = %err, "Failed to open database");
            eprintln!("Could not open database at {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let result = cli.run(&db, &config).await;
    db.close().await;

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
