//! # Storefront Library
//!
//! Cart service, configuration and command line for the storefront.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup)
//! ├── config.rs       ◄─── StorefrontConfig from the environment
//! ├── error.rs        ◄─── ServiceError, ErrorKind, ApiError
//! ├── store.rs        ◄─── ProductCatalog / CartStore / OrderStore traits
//! ├── service/
//! │   ├── cart.rs     ◄─── Cart mutation protocol + summary + checkout
//! │   └── catalog.rs  ◄─── Catalog browsing
//! ├── render.rs       ◄─── Terminal tables and messages
//! └── cli.rs          ◄─── clap commands
//! ```
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront add <product-id> --customer alice                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RequestContext { customer_id: "alice", actor: config.actor }           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartService::add_to_cart ── ProductCatalog ── CartStore                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(CartItem) ─► render      Err(ServiceError) ─► ApiError ─► stderr    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod service;
pub mod store;

use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, StorefrontConfig};
pub use error::{ApiError, ErrorKind, ServiceError};
pub use service::{CartService, CatalogService, OrderConfirmation};
pub use store::{CartStore, OrderStore, ProductCatalog};

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,shop_db=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages everywhere
/// - `RUST_LOG=storefront=trace` - Trace for this crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
