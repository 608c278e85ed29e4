// storefront/src/cart.rs

//! Session-scoped cart operations.
//!
//! Every mutation runs in its own transaction. Returning early with `?` drops the
//! transaction uncommitted, which rolls it back, so a failed call leaves the store
//! exactly as it was.

use crate::catalog;
use crate::error::{ShopError, ShopResult};
use crate::models::{CartLine, CartLineView, CartSummary, CartTotals, Product};
use crate::session::SessionToken;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddStatus {
  Added,
  QuantityUpdated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOutcome {
  pub cart_item_id: i64,
  pub product_id: i64,
  pub product_name: String,
  pub quantity: i64,
  pub status: AddStatus,
}

impl AddOutcome {
  pub fn message(&self) -> String {
    match self.status {
      AddStatus::Added => format!("'{}' added to cart.", self.product_name),
      AddStatus::QuantityUpdated => format!("'{}' quantity updated.", self.product_name),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjustment {
  Increase,
  Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdjustOutcome {
  Updated { new_quantity: i64, item_total_cents: i64 },
  /// The quantity reached zero and the line was deleted.
  Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedLine {
  pub cart_item_id: i64,
  pub product_name: String,
}

/// Adds one unit of `product_id` to the session's cart.
#[instrument(skip(pool, session), fields(session = %session))]
pub async fn add(pool: &SqlitePool, session: &SessionToken, product_id: i64) -> ShopResult<AddOutcome> {
  let product = catalog::get_by_id(pool, product_id).await?;
  add_product(pool, session, &product).await
}

/// Adds one unit of an already resolved product.
///
/// A single upsert against UNIQUE(session_id, product_id): concurrent adds of the same
/// product for the same session increment one row instead of inserting two.
#[instrument(skip(pool, session, product), fields(session = %session, product_id = product.id))]
pub async fn add_product(pool: &SqlitePool, session: &SessionToken, product: &Product) -> ShopResult<AddOutcome> {
  let mut tx = pool.begin().await?;
  let (cart_item_id, quantity): (i64, i64) = sqlx::query_as(
    r#"
INSERT INTO cart_items (session_id, product_id, quantity, added_at)
VALUES (?, ?, 1, ?)
ON CONFLICT (session_id, product_id) DO UPDATE SET quantity = cart_items.quantity + 1
RETURNING id, quantity
"#,
  )
  .bind(session.as_str())
  .bind(product.id)
  .bind(Utc::now())
  .fetch_one(&mut *tx)
  .await?;
  tx.commit().await?;

  let status = if quantity == 1 {
    AddStatus::Added
  } else {
    AddStatus::QuantityUpdated
  };
  info!(cart_item_id, quantity, ?status, "Cart line upserted.");
  Ok(AddOutcome {
    cart_item_id,
    product_id: product.id,
    product_name: product.name.clone(),
    quantity,
    status,
  })
}

/// Increments or decrements a line owned by `session`. Decrementing past 1 deletes it.
///
/// Every statement that touches `cart_items` is a write, and the first one takes the
/// write lock. Concurrent adjustments of the same line queue on that lock instead of
/// both holding a read lock and failing to upgrade it.
#[instrument(skip(pool, session), fields(session = %session))]
pub async fn adjust(
  pool: &SqlitePool,
  session: &SessionToken,
  cart_line_id: i64,
  adjustment: Adjustment,
) -> ShopResult<AdjustOutcome> {
  let mut tx = pool.begin().await?;

  if adjustment == Adjustment::Decrease {
    let deleted: Option<i64> =
      sqlx::query_scalar("DELETE FROM cart_items WHERE id = ? AND session_id = ? AND quantity <= 1 RETURNING id")
        .bind(cart_line_id)
        .bind(session.as_str())
        .fetch_optional(&mut *tx)
        .await?;
    if deleted.is_some() {
      tx.commit().await?;
      info!(cart_line_id, "Cart line removed by decrement.");
      return Ok(AdjustOutcome::Removed);
    }
  }

  let delta: i64 = match adjustment {
    Adjustment::Increase => 1,
    Adjustment::Decrease => -1,
  };
  let updated: Option<(i64, i64)> = sqlx::query_as(
    r#"
UPDATE cart_items SET quantity = quantity + ?
WHERE id = ? AND session_id = ?
RETURNING quantity, product_id
"#,
  )
  .bind(delta)
  .bind(cart_line_id)
  .bind(session.as_str())
  .fetch_optional(&mut *tx)
  .await?;

  let Some((new_quantity, product_id)) = updated else {
    warn!(cart_line_id, "Cart line not found for session.");
    return Err(line_not_found(cart_line_id));
  };

  let price_cents: i64 = sqlx::query_scalar("SELECT price_cents FROM products WHERE id = ?")
    .bind(product_id)
    .fetch_one(&mut *tx)
    .await?;
  tx.commit().await?;
  info!(cart_line_id, new_quantity, ?adjustment, "Cart line quantity adjusted.");
  Ok(AdjustOutcome::Updated {
    new_quantity,
    item_total_cents: price_cents * new_quantity,
  })
}

/// Deletes a line owned by `session`, returning the product name for the confirmation.
#[instrument(skip(pool, session), fields(session = %session))]
pub async fn remove(pool: &SqlitePool, session: &SessionToken, cart_line_id: i64) -> ShopResult<RemovedLine> {
  let mut tx = pool.begin().await?;
  let product_id: Option<i64> =
    sqlx::query_scalar("DELETE FROM cart_items WHERE id = ? AND session_id = ? RETURNING product_id")
      .bind(cart_line_id)
      .bind(session.as_str())
      .fetch_optional(&mut *tx)
      .await?;

  let Some(product_id) = product_id else {
    warn!(cart_line_id, "Cart line not found for session on remove.");
    return Err(line_not_found(cart_line_id));
  };

  let product_name: String = sqlx::query_scalar("SELECT name FROM products WHERE id = ?")
    .bind(product_id)
    .fetch_one(&mut *tx)
    .await?;
  tx.commit().await?;
  info!(cart_line_id, %product_name, "Cart line removed.");
  Ok(RemovedLine {
    cart_item_id: cart_line_id,
    product_name,
  })
}

/// The session's lines joined with their products, oldest first.
pub async fn lines(pool: &SqlitePool, session: &SessionToken) -> ShopResult<Vec<CartLineView>> {
  let lines = sqlx::query_as::<_, CartLineView>(
    r#"
SELECT c.id AS cart_item_id, p.id AS product_id, p.name, p.price_cents, c.quantity, p.image, p.carbon_footprint
FROM cart_items c JOIN products p ON p.id = c.product_id
WHERE c.session_id = ?
ORDER BY c.id ASC
"#,
  )
  .bind(session.as_str())
  .fetch_all(pool)
  .await?;
  Ok(lines)
}

/// The session's raw `cart_items` rows.
pub async fn line_rows(pool: &SqlitePool, session: &SessionToken) -> ShopResult<Vec<CartLine>> {
  let rows = sqlx::query_as::<_, CartLine>(
    "SELECT id, session_id, product_id, quantity, added_at FROM cart_items WHERE session_id = ? ORDER BY id ASC",
  )
  .bind(session.as_str())
  .fetch_all(pool)
  .await?;
  Ok(rows)
}

pub fn summarize(lines: &[CartLineView]) -> CartTotals {
  lines.iter().fold(CartTotals::default(), |acc, line| CartTotals {
    grand_total_cents: acc.grand_total_cents + line.item_total_cents(),
    carbon_impact: acc.carbon_impact + line.item_carbon(),
  })
}

pub async fn totals(pool: &SqlitePool, session: &SessionToken) -> ShopResult<CartTotals> {
  Ok(summarize(&lines(pool, session).await?))
}

pub async fn summary(pool: &SqlitePool, session: &SessionToken) -> ShopResult<CartSummary> {
  let lines = lines(pool, session).await?;
  let totals = summarize(&lines);
  Ok(CartSummary { lines, totals })
}

/// Deletes every line of the session in one transaction. Returns the number of rows removed.
#[instrument(skip(pool, session), fields(session = %session))]
pub async fn clear(pool: &SqlitePool, session: &SessionToken) -> ShopResult<u64> {
  let mut tx = pool.begin().await?;
  let removed = sqlx::query("DELETE FROM cart_items WHERE session_id = ?")
    .bind(session.as_str())
    .execute(&mut *tx)
    .await?
    .rows_affected();
  tx.commit().await?;
  info!(removed, "Cart cleared.");
  Ok(removed)
}

fn line_not_found(cart_line_id: i64) -> ShopError {
  ShopError::NotFound(format!("Cart item {} not found.", cart_line_id))
}
