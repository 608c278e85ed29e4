// storefront/src/models/mod.rs

//! Row types for the `products` and `cart_items` tables, plus the joined cart views.

pub mod cart_line;
pub mod product;

pub use cart_line::{CartLine, CartLineView, CartSummary, CartTotals};
pub use product::{NewProduct, Product};

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

/// Converts integer cents to a decimal amount.
pub fn cents_to_decimal(cents: i64) -> f64 {
  cents as f64 / 100.0
}
