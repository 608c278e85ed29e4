// storefront_server/src/web/views.rs

//! JSON shapes returned to the browser.
//!
//! Prices leave the server as decimals rounded to two places and image file
//! names as URLs under the configured prefix.

use crate::config::AppConfig;
use serde::Serialize;
use storefront::models::{cents_to_decimal, round2, CartLineView, Product};

#[derive(Debug, Serialize)]
pub struct ProductJson {
  pub id: i64,
  pub name: String,
  pub description: String,
  pub price: f64,
  pub image: Option<String>,
  pub carbon_footprint: Option<f64>,
}

impl ProductJson {
  pub fn from_product(product: &Product, config: &AppConfig) -> Self {
    Self {
      id: product.id,
      name: product.name.clone(),
      description: product.description.clone(),
      price: round2(product.price()),
      image: config.image_url(product.image.as_deref()),
      carbon_footprint: product.carbon_footprint,
    }
  }

  pub fn list(products: &[Product], config: &AppConfig) -> Vec<Self> {
    products.iter().map(|p| Self::from_product(p, config)).collect()
  }
}

#[derive(Debug, Serialize)]
pub struct CartItemJson {
  pub cart_item_id: i64,
  pub product_id: i64,
  pub name: String,
  pub price: f64,
  pub quantity: i64,
  pub item_total_price: f64,
  pub image: Option<String>,
  pub carbon_footprint: Option<f64>,
}

impl CartItemJson {
  pub fn from_line(line: &CartLineView, config: &AppConfig) -> Self {
    Self {
      cart_item_id: line.cart_item_id,
      product_id: line.product_id,
      name: line.name.clone(),
      price: round2(cents_to_decimal(line.price_cents)),
      quantity: line.quantity,
      item_total_price: round2(cents_to_decimal(line.item_total_cents())),
      image: config.image_url(line.image.as_deref()),
      carbon_footprint: line.carbon_footprint,
    }
  }
}
