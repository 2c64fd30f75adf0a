//! # Database Pool Management
//!
//! Opens the SQLite pool behind [`Database`] and hands out repositories.
//!
//! ## Startup
//! ```text
//!   StorefrontConfig::from_env()
//!        │  db_path
//!        ▼
//!   DbConfig::file(path)          DbConfig::in_memory()   (tests)
//!        │                              │
//!        └──────────────┬───────────────┘
//!                       ▼
//!   Database::open(config) ── connect_options() + pool sizing
//!                       │
//!                       ▼
//!               migrations (unless disabled)
//!                       │
//!                       ▼
//!   db.products() / db.carts() / db.orders()
//! ```
//!
//! File databases run in WAL mode so catalog reads proceed while a cart write
//! is in flight. A writer waits up to [`DbConfig::busy_timeout`] for the lock
//! before failing.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::cart::CartRepository;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Where the data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// A database file, created on first open.
    File(PathBuf),

    /// A private in-memory database that vanishes with the pool.
    Memory,
}

/// How to open the storefront database.
///
/// ```rust,ignore
/// let config = DbConfig::file("./storefront.db").max_connections(8);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub storage: Storage,

    /// Upper bound on pooled connections. Default: 5
    pub max_connections: u32,

    /// How long a caller waits for a free connection. Default: 30 seconds
    pub acquire_timeout: Duration,

    /// How long a write waits on a locked database. Default: 5 seconds
    pub busy_timeout: Duration,

    /// Apply pending migrations on open. Default: true
    pub migrate: bool,
}

impl DbConfig {
    fn with_storage(storage: Storage) -> Self {
        DbConfig {
            storage,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            migrate: true,
        }
    }

    /// A database file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::with_storage(Storage::File(path.into()))
    }

    /// A fresh, empty database per call. Used by tests.
    pub fn in_memory() -> Self {
        Self::with_storage(Storage::Memory)
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn migrate(mut self, migrate: bool) -> Self {
        self.migrate = migrate;
        self
    }

    /// Path shown in logs.
    pub fn location(&self) -> &Path {
        match &self.storage {
            Storage::File(path) => path,
            Storage::Memory => Path::new(":memory:"),
        }
    }

    /// Connections the pool may hold.
    ///
    /// Every connection to `:memory:` opens its own database, so an in-memory
    /// pool is pinned to one connection whatever was configured.
    fn pool_size(&self) -> u32 {
        match self.storage {
            Storage::File(_) => self.max_connections,
            Storage::Memory => 1,
        }
    }

    /// Per-connection SQLite settings.
    ///
    /// Foreign keys are switched on for every connection: cart items rely on
    /// `ON DELETE CASCADE` and product references.
    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.storage {
            Storage::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
            Storage::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
        };

        Ok(options.foreign_keys(true).busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the storefront database.
///
/// Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and, unless [`DbConfig::migrate`] is off, brings the schema
    /// up to date.
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        let size = config.pool_size();
        info!(location = %config.location().display(), max_connections = size, "Opening database");

        let options = config.connect_options()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(size)
            .min_connections(1)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        debug!("Pool ready");

        let db = Database { pool };
        if config.migrate {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Schema up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn carts(&self) -> CartRepository {
        CartRepository::new(self.pool.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Round-trips a trivial query.
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the pool. Later calls fail with [`DbError::ConnectionFailed`].
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }
}
