// storefront/src/models/cart_line.rs

use super::{cents_to_decimal, round2};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A raw `cart_items` row. At most one per (session_id, product_id); quantity >= 1.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
  pub id: i64,
  pub session_id: String,
  pub product_id: i64,
  pub quantity: i64,
  pub added_at: DateTime<Utc>,
}

/// A cart line joined with its product, as shown on the cart page.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CartLineView {
  pub cart_item_id: i64,
  pub product_id: i64,
  pub name: String,
  pub price_cents: i64,
  pub quantity: i64,
  pub image: Option<String>,
  pub carbon_footprint: Option<f64>,
}

impl CartLineView {
  pub fn item_total_cents(&self) -> i64 {
    self.price_cents * self.quantity
  }

  pub fn item_carbon(&self) -> f64 {
    self.carbon_footprint.unwrap_or(0.0) * self.quantity as f64
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CartTotals {
  pub grand_total_cents: i64,
  /// Unrounded; use `total_carbon_impact()` for display.
  pub carbon_impact: f64,
}

impl CartTotals {
  pub fn grand_total(&self) -> f64 {
    round2(cents_to_decimal(self.grand_total_cents))
  }

  pub fn total_carbon_impact(&self) -> f64 {
    round2(self.carbon_impact)
  }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CartSummary {
  pub lines: Vec<CartLineView>,
  pub totals: CartTotals,
}

impl CartSummary {
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}
