// storefront/src/db/mod.rs

//! Pool construction and the idempotent schema bootstrap.

pub mod seed;

pub use seed::{sample_products, seed_catalog};

use crate::error::ShopResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

const SCHEMA: &[&str] = &[
  r#"
CREATE TABLE IF NOT EXISTS products (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL UNIQUE,
  description TEXT NOT NULL,
  price_cents INTEGER NOT NULL CHECK (price_cents >= 0),
  image TEXT,
  carbon_footprint REAL CHECK (carbon_footprint IS NULL OR carbon_footprint >= 0)
)
"#,
  // UNIQUE(session_id, product_id) backs the add-to-cart upsert.
  r#"
CREATE TABLE IF NOT EXISTS cart_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  session_id TEXT NOT NULL,
  product_id INTEGER NOT NULL REFERENCES products(id),
  quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 1),
  added_at TEXT NOT NULL,
  UNIQUE (session_id, product_id)
)
"#,
  "CREATE INDEX IF NOT EXISTS idx_cart_items_session ON cart_items (session_id)",
];

/// Opens a pool for `database_url`, creating the database file if needed.
pub async fn connect(database_url: &str, max_connections: u32) -> ShopResult<SqlitePool> {
  let options = SqliteConnectOptions::from_str(database_url)?
    .create_if_missing(true)
    .foreign_keys(true);
  let pool = SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect_with(options)
    .await?;
  info!(%database_url, max_connections, "Connected to the database.");
  Ok(pool)
}

/// A single-connection in-memory database with the schema applied.
///
/// Each SQLite in-memory connection is its own database, so the pool is pinned to
/// one connection that is never recycled.
pub async fn connect_in_memory() -> ShopResult<SqlitePool> {
  let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .min_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect_with(options)
    .await?;
  ensure_schema(&pool).await?;
  Ok(pool)
}

pub async fn ensure_schema(pool: &SqlitePool) -> ShopResult<()> {
  for statement in SCHEMA {
    sqlx::query(statement).execute(pool).await?;
  }
  Ok(())
}

/// Round trip used by the health endpoint.
pub async fn ping(pool: &SqlitePool) -> ShopResult<()> {
  sqlx::query("SELECT 1").execute(pool).await?;
  Ok(())
}
