// storefront/src/catalog.rs

//! Read access to the product catalog: sorted listing, search and lookups.

use crate::error::{ShopError, ShopResult};
use crate::models::{NewProduct, Product};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, warn};

const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, image, carbon_footprint";

/// Ordering for the product listing. Unknown values fall back to `Name`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
  #[default]
  Name,
  Price,
  Carbon,
}

impl SortKey {
  pub fn parse(raw: Option<&str>) -> Self {
    match raw.map(str::trim) {
      Some("price") => SortKey::Price,
      Some("carbon") => SortKey::Carbon,
      _ => SortKey::Name,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      SortKey::Name => "name",
      SortKey::Price => "price",
      SortKey::Carbon => "carbon",
    }
  }

  fn order_by(&self) -> &'static str {
    match self {
      SortKey::Name => "name ASC, id ASC",
      SortKey::Price => "price_cents DESC, id ASC",
      SortKey::Carbon => "carbon_footprint IS NULL, carbon_footprint DESC, id ASC",
    }
  }
}

pub async fn list_sorted(pool: &SqlitePool, sort: SortKey) -> ShopResult<Vec<Product>> {
  let sql = format!("SELECT {} FROM products ORDER BY {}", PRODUCT_COLUMNS, sort.order_by());
  let products = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
  debug!(sort = sort.as_str(), count = products.len(), "Listed products.");
  Ok(products)
}

/// Case-insensitive substring match on name or description.
///
/// Callers reject blank terms before calling; a blank term here matches everything.
pub async fn search(pool: &SqlitePool, term: &str) -> ShopResult<Vec<Product>> {
  let pattern = format!("%{}%", escape_like(term.trim()));
  let sql = format!(
    "SELECT {} FROM products \
     WHERE name LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\' \
     ORDER BY name ASC, id ASC",
    PRODUCT_COLUMNS
  );
  let products = sqlx::query_as::<_, Product>(&sql).bind(pattern).fetch_all(pool).await?;
  debug!(%term, matches = products.len(), "Searched products.");
  Ok(products)
}

fn escape_like(term: &str) -> String {
  let mut escaped = String::with_capacity(term.len());
  for c in term.chars() {
    if matches!(c, '%' | '_' | '\\') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> ShopResult<Product> {
  let sql = format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS);
  sqlx::query_as::<_, Product>(&sql)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
      warn!(product_id = id, "Product not found.");
      ShopError::NotFound(format!("Product with ID {} not found.", id))
    })
}

/// Fetches the given products in the order of `ids`; unknown ids are skipped.
pub async fn get_many_ordered(pool: &SqlitePool, ids: &[i64]) -> ShopResult<Vec<Product>> {
  if ids.is_empty() {
    return Ok(Vec::new());
  }
  let placeholders = vec!["?"; ids.len()].join(", ");
  let sql = format!("SELECT {} FROM products WHERE id IN ({})", PRODUCT_COLUMNS, placeholders);
  let mut query = sqlx::query_as::<_, Product>(&sql);
  for id in ids {
    query = query.bind(*id);
  }
  let mut by_id: HashMap<i64, Product> = query.fetch_all(pool).await?.into_iter().map(|p| (p.id, p)).collect();
  Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> ShopResult<Option<Product>> {
  let sql = format!("SELECT {} FROM products WHERE name = ?", PRODUCT_COLUMNS);
  Ok(sqlx::query_as::<_, Product>(&sql).bind(name).fetch_optional(pool).await?)
}

pub async fn count(pool: &SqlitePool) -> ShopResult<i64> {
  Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products").fetch_one(pool).await?)
}

pub async fn insert_product(pool: &SqlitePool, new_product: &NewProduct) -> ShopResult<Product> {
  let sql = format!(
    "INSERT INTO products (name, description, price_cents, image, carbon_footprint) \
     VALUES (?, ?, ?, ?, ?) RETURNING {}",
    PRODUCT_COLUMNS
  );
  let product = sqlx::query_as::<_, Product>(&sql)
    .bind(&new_product.name)
    .bind(&new_product.description)
    .bind(new_product.price_cents)
    .bind(&new_product.image)
    .bind(new_product.carbon_footprint)
    .fetch_one(pool)
    .await?;
  Ok(product)
}
